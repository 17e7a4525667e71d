//! Generic Bootloader.
//!
//! This module contains the full boot flow, with the exception of how
//! to construct its parts. Construction is handled by the `ports`
//! module as it depends on board specific information.
//!
//! The flow is split in two so the resident-only hardware (data
//! channel, clock, indicators) is never brought up on the path that
//! hands control to the application:
//!
//! * `Bootloader::arbitrate` snapshots the reset cause and either jumps
//!   to the application (never returning) or yields a `Resident`.
//! * `Resident::run` brings the channel up, blinking the status
//!   indicator while the host enumerates, then runs the dispatcher and
//!   status tasks forever.
use super::{
    arbiter::{Boot, BootArbiter},
    dispatcher::{CommandProcessor, Dispatcher, Indicators},
    image::ImageValidator,
    reset_cause::ResetFlags,
    session::ResidentSession,
    status::StatusIndicator,
    traits::Channel,
    transport,
    watchdog::{Disarmed, Watchdog},
};
use crate::{
    config::Config,
    hal::{
        boot::ControlTransfer,
        channel::EventReceiver,
        led::Toggle,
        reset::ResetCauseRegister,
        time::{Now, Wait},
        watchdog::IndependentWatchdog,
    },
    log::{info, warn},
};

pub struct Bootloader<R, V, W, J>
where
    R: ResetCauseRegister,
    V: ImageValidator,
    W: IndependentWatchdog,
    J: ControlTransfer,
{
    pub(crate) reset_register: R,
    pub(crate) validator: V,
    pub(crate) watchdog: Watchdog<W, Disarmed>,
    pub(crate) jump: J,
    pub(crate) config: Config,
}

/// Proof that this boot stays in bootloader mode, with everything the
/// resident tasks need to start.
pub struct Resident {
    flags: ResetFlags,
    config: Config,
}

impl<R, V, W, J> Bootloader<R, V, W, J>
where
    R: ResetCauseRegister,
    V: ImageValidator,
    W: IndependentWatchdog,
    J: ControlTransfer,
{
    pub fn new(reset_register: R, validator: V, watchdog: W, jump: J, config: Config) -> Self {
        Self { reset_register, validator, watchdog: Watchdog::new(watchdog), jump, config }
    }

    /// Decides, once, what this boot does. Only returns if the
    /// bootloader stays resident.
    pub fn arbitrate(mut self) -> Resident {
        let arbiter = BootArbiter::new(self.config.entry_point);
        match arbiter.arbitrate(
            &mut self.reset_register,
            &self.validator,
            self.watchdog,
            &self.config.watchdog,
        ) {
            Boot::Resident(flags) => Resident { flags, config: self.config },
            Boot::Transfer { entry, watchdog: _armed } => {
                warn!("Jumping to the application at {:#x}. This will break `defmt`.", entry.0);
                self.jump.jump_to_user(entry)
            }
        }
    }
}

impl Resident {
    pub fn flags(&self) -> ResetFlags { self.flags }

    /// Brings the data channel up and returns the session serving it.
    /// The status task gets a turn on every readiness poll.
    pub fn connect<'q, C, P, L, T>(
        self,
        channel: C,
        events: EventReceiver<'q>,
        processor: P,
        indicators: Indicators<L>,
        status_led: L,
        mut clock: T,
    ) -> ResidentSession<'q, C, P, L, T>
    where
        C: Channel,
        P: CommandProcessor<C>,
        L: Toggle,
        T: Now + Wait,
    {
        info!("Resident with flags {:#x}", self.flags.bits());
        let mut status = StatusIndicator::new(status_led, self.config.status);
        let ready = transport::establish_observed(
            channel,
            &mut clock,
            &self.config.transport,
            |clock: &T, state| status.poll(clock.now(), state),
        );
        let dispatcher = Dispatcher::new(ready, processor, self.flags, events, indicators);
        ResidentSession::new(dispatcher, status, clock)
    }

    /// Serves commands until power loss or an external reset.
    pub fn run<'q, C, P, L, T>(
        self,
        channel: C,
        events: EventReceiver<'q>,
        processor: P,
        indicators: Indicators<L>,
        status_led: L,
        clock: T,
    ) -> !
    where
        C: Channel,
        P: CommandProcessor<C>,
        L: Toggle,
        T: Now + Wait,
    {
        self.connect(channel, events, processor, indicators, status_led, clock).run()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        devices::{
            dispatcher::Outcome,
            image::VectorTableValidator,
            led::{Led, Logic},
        },
        hal::{
            boot::EntryPoint,
            channel::{ChannelEvents, EventFlags},
            doubles::{
                boot::{FakeMemory, MockJump},
                channel::MockChannel,
                gpio::MockPin,
                reset::FakeResetRegister,
                time::MockClock,
                watchdog::MockWatchdog,
                Journal, Operation,
            },
            reset::ResetBits,
            watchdog::Prescaler,
        },
    };
    use core::num::NonZeroU8;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    const ENTRY: u32 = 0x0800_4000;

    fn bootloader(
        bits: ResetBits,
        memory: FakeMemory,
        journal: &Journal,
    ) -> Bootloader<FakeResetRegister, VectorTableValidator<FakeMemory>, MockWatchdog, MockJump> {
        Bootloader::new(
            FakeResetRegister::new(bits, journal.clone()),
            VectorTableValidator::new(memory, 0x2000_0000..0x2000_A000, ENTRY..0x0804_0000),
            MockWatchdog::new(journal.clone()),
            MockJump::new(journal.clone()),
            Config::default(),
        )
    }

    fn valid_image() -> FakeMemory {
        FakeMemory::default().with_word(ENTRY, 0x2000_A000).with_word(ENTRY + 4, 0x0800_41C5)
    }

    #[test]
    fn power_on_with_valid_image_arms_the_watchdog_then_jumps() {
        // Given
        let journal = Journal::default();
        let bootloader = bootloader(ResetBits::default(), valid_image(), &journal);

        // When
        let result = catch_unwind(AssertUnwindSafe(|| bootloader.arbitrate()));

        // Then
        assert!(result.is_err());
        assert_eq!(
            vec![
                Operation::ReadResetCause,
                Operation::ClearResetCause,
                Operation::WatchdogWriteAccess,
                Operation::WatchdogPrescaler(Prescaler::Div32),
                Operation::WatchdogReload(328),
                Operation::WatchdogEnable,
                Operation::Jump(EntryPoint(ENTRY)),
            ],
            journal.operations()
        );
    }

    #[test]
    fn watchdog_reset_stays_resident_with_watchdog_disarmed() {
        // Given
        let journal = Journal::default();
        let bootloader =
            bootloader(ResetBits { watchdog: true, software: false }, valid_image(), &journal);

        // When
        let resident = bootloader.arbitrate();

        // Then
        assert!(resident.flags().contains(ResetFlags::WATCHDOG_RESET));
        assert_eq!(0, journal.count(Operation::WatchdogEnable));
        assert_eq!(0, journal.count(Operation::Jump(EntryPoint(ENTRY))));
        assert_eq!(1, journal.count(Operation::ClearResetCause));
    }

    #[test]
    fn erased_application_keeps_the_bootloader_resident() {
        // Given
        let journal = Journal::default();
        let bootloader = bootloader(ResetBits::default(), FakeMemory::default(), &journal);

        // When
        let resident = bootloader.arbitrate();

        // Then
        assert_eq!(ResetFlags::OK, resident.flags());
        assert_eq!(
            vec![Operation::ReadResetCause, Operation::ClearResetCause],
            journal.operations()
        );
    }

    #[test]
    fn status_blinks_at_the_idle_period_while_the_host_enumerates() {
        // Given (the host takes 1.2 seconds to enumerate)
        let journal = Journal::default();
        let resident =
            bootloader(ResetBits { watchdog: false, software: true }, valid_image(), &journal)
                .arbitrate();
        let channel = MockChannel::new(journal.clone()).ready_after(Some(120));
        let clock = MockClock::new(journal.clone());
        let events = EventFlags::new();
        let (mut sender, receiver) = events.split();
        let status_pin = MockPin::default();
        let indicators = Indicators {
            activity: Led::new(MockPin::default(), Logic::Direct),
            rejected: Led::new(MockPin::default(), Logic::Direct),
            accepted: Led::new(MockPin::default(), Logic::Direct),
        };
        let processor = |_: &mut MockChannel, flags: ResetFlags| -> u8 { flags.bits() };

        // When
        let mut session = resident.connect(
            channel,
            receiver,
            processor,
            indicators,
            Led::new(status_pin.clone(), Logic::Direct),
            clock,
        );

        // Then (toggled at 500 and 1000 ms, before the channel was Ready)
        assert_eq!(vec![false, true, false], status_pin.changes());

        // Then (the dispatcher serves the first command with the reset flags)
        sender.publish(ChannelEvents::INPUT_AVAILABLE);
        let code = (ResetFlags::OK | ResetFlags::SOFTWARE_RESET).bits();
        assert_eq!(Some(Outcome::Accepted(NonZeroU8::new(code).unwrap())), session.step());
    }
}
