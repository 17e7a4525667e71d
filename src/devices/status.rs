//! Status task: blinks an indicator faster while the host channel is
//! Ready than while it is not. It only ever reads the transport state
//! and shares nothing with the dispatcher.
use crate::hal::{
    channel::TransportState,
    led::Toggle,
    time::{Instant, Milliseconds},
};

pub mod config {
    use super::*;

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Config {
        /// Toggle period while the channel is Ready.
        pub active_period: Milliseconds,
        /// Toggle period otherwise.
        pub idle_period: Milliseconds,
    }

    impl Default for Config {
        fn default() -> Self {
            Self { active_period: Milliseconds(250), idle_period: Milliseconds(500) }
        }
    }
}

pub struct StatusIndicator<L: Toggle, I: Instant> {
    led: L,
    config: config::Config,
    last_toggle: Option<I>,
}

impl<L: Toggle, I: Instant> StatusIndicator<L, I> {
    pub fn new(led: L, config: config::Config) -> Self { Self { led, config, last_toggle: None } }

    fn period(&self, state: TransportState) -> Milliseconds {
        match state {
            TransportState::Ready => self.config.active_period,
            _ => self.config.idle_period,
        }
    }

    /// Gives the task a turn. Never blocks.
    pub fn poll(&mut self, now: I, state: TransportState) {
        match self.last_toggle {
            None => self.last_toggle = Some(now),
            Some(last) if now - last >= self.period(state) => {
                self.led.toggle();
                self.last_toggle = Some(now);
            }
            Some(_) => (),
        }
    }
}
