//! Host-facing bulk data channel interface.
//!
//! A channel driver exposes three things to the bootloader core: the
//! session lifecycle (`Link`), bounded reads (`TimeoutRead`) and
//! notifications published into a shared `EventFlags` set.
//! The driver is the only writer of the transport state; everyone else
//! observes it through a `StateCell`.
use crate::hal::time::Milliseconds;
use bitflags::bitflags;
use core::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

/// Lifecycle of the channel, from cold to enumerated by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
#[repr(u8)]
pub enum TransportState {
    Disconnected = 0,
    Starting = 1,
    Connected = 2,
    Ready = 3,
}

impl TransportState {
    fn from_bits(bits: u8) -> Self {
        match bits {
            1 => TransportState::Starting,
            2 => TransportState::Connected,
            3 => TransportState::Ready,
            _ => TransportState::Disconnected,
        }
    }
}

/// Transport state shared between the driver (possibly updating it
/// from interrupt context) and its observers. A single atomic byte,
/// so reads and writes need no lock.
pub struct StateCell(AtomicU8);

impl StateCell {
    pub const fn new() -> Self { Self(AtomicU8::new(TransportState::Disconnected as u8)) }
    pub fn load(&self) -> TransportState {
        TransportState::from_bits(self.0.load(Ordering::Acquire))
    }
    pub fn store(&self, state: TransportState) { self.0.store(state as u8, Ordering::Release) }
}

impl Default for StateCell {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for StateCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StateCell").field(&self.load()).finish()
    }
}

/// Session control of a host-driven channel.
pub trait Link {
    /// Logically detaches from the host, even if no session exists.
    fn disconnect(&mut self);
    /// Starts the underlying driver.
    fn start(&mut self);
    /// Logically attaches to the host, which then begins enumeration.
    fn connect(&mut self);
    /// Stops the underlying driver, undoing `start`.
    fn stop(&mut self);
    fn state(&self) -> TransportState;
}

/// Reads up to `buffer.len()` bytes, giving up after `timeout`.
/// Returns the number of bytes actually read.
pub trait TimeoutRead {
    type Error;
    fn read_with_timeout(
        &mut self,
        buffer: &mut [u8],
        timeout: Milliseconds,
    ) -> Result<usize, Self::Error>;
}

bitflags! {
    /// Notifications published by a channel driver.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
    pub struct ChannelEvents: u8 {
        const CONNECTED = 1 << 0;
        const DISCONNECTED = 1 << 1;
        const INPUT_AVAILABLE = 1 << 2;
        const OUTPUT_EMPTY = 1 << 3;
    }
}

/// Pending channel notifications. Publishing ORs into the set, so a
/// notification is never lost however long the consumer takes; taking
/// fetches and clears the whole set in one atomic step.
pub struct EventFlags(AtomicU8);

impl EventFlags {
    pub const fn new() -> Self { Self(AtomicU8::new(0)) }

    /// Hands out the publishing half (for the driver) and the taking
    /// half (for the dispatcher).
    pub fn split(&self) -> (EventSender<'_>, EventReceiver<'_>) {
        (EventSender { flags: self }, EventReceiver { flags: self })
    }
}

impl Default for EventFlags {
    fn default() -> Self { Self::new() }
}

/// Publishing half, safe to use from interrupt context.
pub struct EventSender<'a> {
    flags: &'a EventFlags,
}

impl EventSender<'_> {
    pub fn publish(&mut self, events: ChannelEvents) {
        self.flags.0.fetch_or(events.bits(), Ordering::AcqRel);
    }
}

/// Taking half.
pub struct EventReceiver<'a> {
    flags: &'a EventFlags,
}

impl EventReceiver<'_> {
    /// Fetches and clears every pending notification. `None` if there
    /// were none.
    pub fn take(&mut self) -> Option<ChannelEvents> {
        let events = ChannelEvents::from_bits_truncate(self.flags.0.swap(0, Ordering::AcqRel));
        (!events.is_empty()).then_some(events)
    }
}
