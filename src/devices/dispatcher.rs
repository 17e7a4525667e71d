//! Command dispatcher.
//!
//! Consumes one command at a time from a Ready channel. Each wake-up
//! drains every pending channel notification at once (the fetch-and-
//! clear), and only an `INPUT_AVAILABLE` notification leads to a read.
//! The command itself is opaque: an external `CommandProcessor` reads
//! and executes it, reporting a single result code. Failed commands are
//! never retried.
use super::{reset_cause::ResetFlags, traits::Channel, transport::ReadyChannel};
use crate::{
    hal::{
        channel::{ChannelEvents, EventReceiver, TransportState},
        led::Toggle,
        time::Milliseconds,
    },
    log::{debug, warn},
};
use core::{convert::Infallible, num::NonZeroU8};

/// Size of the scratch buffer drained after every command.
pub const DRAIN_BUFFER_SIZE: usize = 64;
/// Upper bound on the drain read.
pub const DRAIN_TIMEOUT: Milliseconds = Milliseconds(25);

/// External command layer. Reads one command unit from the channel and
/// executes it. Returns 0 when no command was recognized or it failed,
/// and a nonzero code when one was processed.
pub trait CommandProcessor<C> {
    fn read_command(&mut self, channel: &mut C, flags: ResetFlags) -> u8;
}

impl<C, F> CommandProcessor<C> for F
where
    F: FnMut(&mut C, ResetFlags) -> u8,
{
    fn read_command(&mut self, channel: &mut C, flags: ResetFlags) -> u8 { self(channel, flags) }
}

/// Where the dispatcher is in handling a wake-up. Reading the command
/// belongs to the processor, so it is part of `Dispatching`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum DispatchState {
    WaitingForEvent,
    Dispatching,
    Draining,
}

/// Result of handling one wake-up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Outcome {
    /// Woken without input available; nothing was read.
    Spurious,
    /// No command recognized, or the command failed.
    Rejected,
    /// A command was processed, with its result code.
    Accepted(NonZeroU8),
}

/// The dispatcher's indicator outputs.
pub struct Indicators<L: Toggle> {
    /// Lit while a command is being processed.
    pub activity: L,
    /// Toggled on every rejected command.
    pub rejected: L,
    /// Toggled on every accepted command.
    pub accepted: L,
}

pub struct Dispatcher<'q, C, P, L>
where
    C: Channel,
    P: CommandProcessor<C>,
    L: Toggle,
{
    channel: C,
    processor: P,
    flags: ResetFlags,
    events: EventReceiver<'q>,
    indicators: Indicators<L>,
    state: DispatchState,
}

impl<'q, C, P, L> Dispatcher<'q, C, P, L>
where
    C: Channel,
    P: CommandProcessor<C>,
    L: Toggle,
{
    pub fn new(
        channel: ReadyChannel<C>,
        processor: P,
        flags: ResetFlags,
        events: EventReceiver<'q>,
        mut indicators: Indicators<L>,
    ) -> Self {
        indicators.activity.off();
        Self {
            channel: channel.into_inner(),
            processor,
            flags,
            events,
            indicators,
            state: DispatchState::WaitingForEvent,
        }
    }

    pub fn state(&self) -> DispatchState { self.state }

    pub fn transport_state(&self) -> TransportState { self.channel.state() }

    fn enter(&mut self, state: DispatchState) {
        debug!("Dispatcher: {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Handles one wake-up, or reports `WouldBlock` while there is
    /// nothing to wake up for. The dispatcher is back in
    /// `WaitingForEvent` whenever this returns.
    pub fn poll(&mut self) -> nb::Result<Outcome, Infallible> {
        let events = self.events.take().ok_or(nb::Error::WouldBlock)?;
        if !events.contains(ChannelEvents::INPUT_AVAILABLE) {
            return Ok(Outcome::Spurious);
        }

        self.indicators.activity.on();
        let outcome = self.dispatch();
        self.drain();

        match outcome {
            Outcome::Rejected => self.indicators.rejected.toggle(),
            _ => self.indicators.accepted.toggle(),
        }
        self.indicators.activity.off();
        self.enter(DispatchState::WaitingForEvent);
        debug!("Command outcome: {:?}", outcome);
        Ok(outcome)
    }

    fn dispatch(&mut self) -> Outcome {
        self.enter(DispatchState::Dispatching);
        match NonZeroU8::new(self.processor.read_command(&mut self.channel, self.flags)) {
            Some(code) => Outcome::Accepted(code),
            None => Outcome::Rejected,
        }
    }

    /// Discards whatever trailing bytes the command framing left behind,
    /// so they are not taken for the start of the next command.
    fn drain(&mut self) {
        self.enter(DispatchState::Draining);
        let mut scratch = [0u8; DRAIN_BUFFER_SIZE];
        if self.channel.read_with_timeout(&mut scratch, DRAIN_TIMEOUT).is_err() {
            warn!("Drain read failed");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        devices::{
            led::{Led, Logic},
            transport::{self, config::Config},
        },
        hal::{
            channel::{EventFlags, TimeoutRead},
            doubles::{
                channel::MockChannel, gpio::MockPin, time::MockClock, Journal, Operation,
            },
        },
    };
    use std::{cell::RefCell, rc::Rc, vec::Vec};

    struct Pins {
        activity: MockPin,
        rejected: MockPin,
        accepted: MockPin,
    }

    impl Pins {
        fn new() -> Self {
            Self {
                activity: MockPin::default(),
                rejected: MockPin::default(),
                accepted: MockPin::default(),
            }
        }

        fn indicators(&self) -> Indicators<Led<MockPin>> {
            Indicators {
                activity: Led::new(self.activity.clone(), Logic::Direct),
                rejected: Led::new(self.rejected.clone(), Logic::Direct),
                accepted: Led::new(self.accepted.clone(), Logic::Direct),
            }
        }

        /// Number of toggles since construction (the first change is the
        /// initial "off").
        fn toggles(pin: &MockPin) -> usize { pin.changes().len() - 1 }
    }

    fn ready(journal: &Journal) -> ReadyChannel<MockChannel> {
        let mut clock = MockClock::new(journal.clone());
        transport::establish(MockChannel::new(journal.clone()), &mut clock, &Config::default())
    }

    fn drain_reads(journal: &Journal) -> usize {
        journal.count(Operation::Read { length: DRAIN_BUFFER_SIZE, timeout: DRAIN_TIMEOUT })
    }

    #[test]
    fn nothing_to_do_without_notifications() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let flags = EventFlags::new();
        let (_sender, receiver) = flags.split();
        let processor =
            |_: &mut MockChannel, _: ResetFlags| -> u8 { panic!("No command expected") };
        let channel = ready(&journal);
        let mut dispatcher =
            Dispatcher::new(channel, processor, ResetFlags::OK, receiver, pins.indicators());

        // Then
        assert_eq!(Err(nb::Error::WouldBlock), dispatcher.poll());
        assert_eq!(DispatchState::WaitingForEvent, dispatcher.state());
        assert_eq!(0, drain_reads(&journal));
    }

    #[test]
    fn spurious_wakes_change_nothing() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let processor =
            |_: &mut MockChannel, _: ResetFlags| -> u8 { panic!("No command expected") };
        let channel = ready(&journal);
        let mut dispatcher =
            Dispatcher::new(channel, processor, ResetFlags::OK, receiver, pins.indicators());
        journal.clear();

        // When
        for _ in 0..3 {
            sender.publish(ChannelEvents::OUTPUT_EMPTY);
            assert_eq!(Ok(Outcome::Spurious), dispatcher.poll());
        }

        // Then
        assert_eq!(DispatchState::WaitingForEvent, dispatcher.state());
        assert!(journal.operations().is_empty());
        assert_eq!(0, Pins::toggles(&pins.rejected));
        assert_eq!(0, Pins::toggles(&pins.accepted));
        assert_eq!(0, Pins::toggles(&pins.activity));
    }

    #[test]
    fn accepted_command_toggles_indicator_b_once_after_a_bounded_drain() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let processor = |channel: &mut MockChannel, _: ResetFlags| -> u8 {
            let mut command = [0u8; 4];
            channel.read_with_timeout(&mut command, Milliseconds(100)).unwrap();
            7
        };
        let channel = ready(&journal);
        journal.clear();
        let mut dispatcher =
            Dispatcher::new(channel, processor, ResetFlags::OK, receiver, pins.indicators());

        // When
        sender.publish(ChannelEvents::INPUT_AVAILABLE);
        let outcome = dispatcher.poll();

        // Then
        assert_eq!(Ok(Outcome::Accepted(NonZeroU8::new(7).unwrap())), outcome);
        assert_eq!(1, Pins::toggles(&pins.accepted));
        assert_eq!(0, Pins::toggles(&pins.rejected));
        assert_eq!(
            vec![
                Operation::Read { length: 4, timeout: Milliseconds(100) },
                Operation::Read { length: DRAIN_BUFFER_SIZE, timeout: DRAIN_TIMEOUT },
            ],
            journal.operations()
        );
        assert_eq!(DispatchState::WaitingForEvent, dispatcher.state());
        assert_eq!(vec![false, true, false], pins.activity.changes());
    }

    #[test]
    fn each_command_result_picks_its_indicator() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let codes = [0u8, 3, 0, 0, 255, 1];
        let mut script = codes.iter().copied();
        let processor = move |_: &mut MockChannel, _: ResetFlags| -> u8 { script.next().unwrap() };
        let channel = ready(&journal);
        let mut dispatcher =
            Dispatcher::new(channel, processor, ResetFlags::OK, receiver, pins.indicators());

        // When
        let outcomes: Vec<_> = codes
            .iter()
            .map(|_| {
                sender.publish(ChannelEvents::INPUT_AVAILABLE);
                dispatcher.poll().unwrap()
            })
            .collect();

        // Then
        assert_eq!(Outcome::Rejected, outcomes[0]);
        assert_eq!(Outcome::Accepted(NonZeroU8::new(255).unwrap()), outcomes[4]);
        assert_eq!(3, Pins::toggles(&pins.rejected));
        assert_eq!(3, Pins::toggles(&pins.accepted));
        assert_eq!(codes.len(), drain_reads(&journal));
    }

    #[test]
    fn pending_notifications_are_coalesced_into_one_command() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        let processor = move |_: &mut MockChannel, _: ResetFlags| -> u8 {
            *counter.borrow_mut() += 1;
            1
        };
        let channel = ready(&journal);
        let mut dispatcher =
            Dispatcher::new(channel, processor, ResetFlags::OK, receiver, pins.indicators());

        // When
        sender.publish(ChannelEvents::CONNECTED);
        sender.publish(ChannelEvents::INPUT_AVAILABLE);
        sender.publish(ChannelEvents::INPUT_AVAILABLE);

        // Then
        assert!(matches!(dispatcher.poll(), Ok(Outcome::Accepted(_))));
        assert_eq!(Err(nb::Error::WouldBlock), dispatcher.poll());
        assert_eq!(1, *calls.borrow());
    }

    #[test]
    fn input_behind_a_burst_of_notifications_is_still_served() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let processor = |_: &mut MockChannel, _: ResetFlags| -> u8 { 2 };
        let channel = ready(&journal);
        let mut dispatcher =
            Dispatcher::new(channel, processor, ResetFlags::OK, receiver, pins.indicators());

        // When (the driver raises more notifications than any fixed buffer)
        for _ in 0..7 {
            sender.publish(ChannelEvents::OUTPUT_EMPTY);
        }
        sender.publish(ChannelEvents::INPUT_AVAILABLE);

        // Then
        assert_eq!(Ok(Outcome::Accepted(NonZeroU8::new(2).unwrap())), dispatcher.poll());
        assert_eq!(Err(nb::Error::WouldBlock), dispatcher.poll());
        assert_eq!(1, Pins::toggles(&pins.accepted));
    }

    #[test]
    fn processor_sees_the_reset_flags_and_drain_failures_are_absorbed() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let flags = ResetFlags::OK | ResetFlags::WATCHDOG_RESET;
        let processor = move |channel: &mut MockChannel, seen: ResetFlags| -> u8 {
            assert_eq!(flags, seen);
            channel.fail_reads = true;
            0
        };
        let mut dispatcher =
            Dispatcher::new(ready(&journal), processor, flags, receiver, pins.indicators());

        // When
        sender.publish(ChannelEvents::INPUT_AVAILABLE);

        // Then
        assert_eq!(Ok(Outcome::Rejected), dispatcher.poll());
        assert_eq!(1, drain_reads(&journal));
        assert_eq!(1, Pins::toggles(&pins.rejected));
    }

    #[test]
    fn trailing_bytes_are_drained_before_the_next_command() {
        // Given
        let journal = Journal::default();
        let pins = Pins::new();
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let mut channel = ready(&journal).into_inner();
        channel.receive(&[0xA5, 0x01, 0xEE, 0xEE, 0xEE]);
        let mut clock = MockClock::new(journal.clone());
        let ready_again = transport::establish(channel, &mut clock, &Config::default());
        let processor = |channel: &mut MockChannel, _: ResetFlags| -> u8 {
            let mut header = [0u8; 2];
            channel.read_with_timeout(&mut header, Milliseconds(100)).unwrap();
            header[1]
        };
        let mut dispatcher =
            Dispatcher::new(ready_again, processor, ResetFlags::OK, receiver, pins.indicators());

        // When
        sender.publish(ChannelEvents::INPUT_AVAILABLE);
        dispatcher.poll().unwrap();

        // Then
        assert!(dispatcher.channel.incoming.is_empty());
    }
}
