//! Transport session manager.
//!
//! Brings the host-facing channel from cold to Ready, strictly in the
//! order disconnect, start, connect, then poll. The forced disconnect
//! clears host-side enumeration state left behind by an uncommanded
//! reset. A `ReadyChannel` can only be obtained from here, so nothing
//! reads from a channel the host has not enumerated yet.
//!
//! The wait for Ready is unbounded unless a timeout is configured. A
//! bounded wait stops the driver and restarts the whole sequence on
//! expiry, discarding the host's enumeration progress, so the bound
//! must exceed the slowest host expected (first-time driver installs
//! can take several seconds).
use crate::{
    error::Error,
    hal::{
        channel::{Link, TransportState},
        time::{Milliseconds, Wait},
    },
    log::{debug, info, warn},
};

pub mod config {
    //! Readiness polling of the data channel.
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Config {
        /// Delay between two state polls.
        pub poll_interval: Milliseconds,
        /// Upper bound on the wait for Ready in a single bring-up
        /// attempt. `None` (the default) waits for as long as it takes.
        pub ready_timeout: Option<Milliseconds>,
    }

    impl Default for Config {
        fn default() -> Self {
            Self { poll_interval: Milliseconds(10), ready_timeout: None }
        }
    }

    impl Config {
        pub fn poll_interval(mut self, interval: Milliseconds) -> Self {
            self.poll_interval = interval;
            self
        }

        pub fn ready_timeout(mut self, timeout: Option<Milliseconds>) -> Self {
            self.ready_timeout = timeout;
            self
        }

        /// Number of polls that fit in the timeout, if bounded.
        pub(crate) fn max_polls(&self) -> Option<u32> {
            let interval = self.poll_interval.0.max(1);
            self.ready_timeout.map(|timeout| timeout.0.div_ceil(interval))
        }
    }
}

/// A channel the host has finished enumerating.
pub struct ReadyChannel<C: Link> {
    channel: C,
}

impl<C: Link> ReadyChannel<C> {
    pub fn state(&self) -> TransportState { self.channel.state() }
    pub(crate) fn into_inner(self) -> C { self.channel }
}

/// Runs one bring-up attempt. Returns the terminal `Ready` state, or
/// `Error::TransportTimeout` if the configured bound expires first.
pub fn bring_up<C: Link, D: Wait>(
    channel: &mut C,
    delay: &mut D,
    config: &config::Config,
) -> Result<TransportState, Error> {
    bring_up_observed(channel, delay, config, |_: &D, _| ())
}

/// As `bring_up`, handing every state seen before Ready to `observer`
/// so other work (the status blink) keeps running while the host
/// enumerates.
pub fn bring_up_observed<C, D, F>(
    channel: &mut C,
    delay: &mut D,
    config: &config::Config,
    mut observer: F,
) -> Result<TransportState, Error>
where
    C: Link,
    D: Wait,
    F: FnMut(&D, TransportState),
{
    channel.disconnect();
    channel.start();
    channel.connect();

    let max_polls = config.max_polls();
    let mut polls = 0u32;
    loop {
        let state = channel.state();
        if state == TransportState::Ready {
            debug!("Channel ready after {} polls", polls);
            return Ok(state);
        }
        observer(&*delay, state);
        if max_polls.is_some_and(|max| polls >= max) {
            return Err(Error::TransportTimeout);
        }
        delay.wait(config.poll_interval);
        polls += 1;
    }
}

/// Repeats bring-up attempts until the channel is Ready. Each timeout
/// stops the driver and restarts the sequence from the forced
/// disconnect.
pub fn establish<C: Link, D: Wait>(
    channel: C,
    delay: &mut D,
    config: &config::Config,
) -> ReadyChannel<C> {
    establish_observed(channel, delay, config, |_: &D, _| ())
}

/// As `establish`, with an observer of the states seen while waiting.
pub fn establish_observed<C, D, F>(
    mut channel: C,
    delay: &mut D,
    config: &config::Config,
    mut observer: F,
) -> ReadyChannel<C>
where
    C: Link,
    D: Wait,
    F: FnMut(&D, TransportState),
{
    let mut attempt = 1u32;
    loop {
        match bring_up_observed(&mut channel, delay, config, &mut observer) {
            Ok(_) => {
                info!("Channel ready (attempt {})", attempt);
                return ReadyChannel { channel };
            }
            Err(error) => {
                warn!("Bring-up attempt {} failed: {:?}", attempt, error);
                channel.stop();
                attempt = attempt.wrapping_add(1);
            }
        }
    }
}
