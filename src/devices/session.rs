//! Resident session: the two tasks that run once the bootloader
//! decides to stay resident.
//!
//! The dispatcher has priority. It is polled first on every pass, and
//! the status task only gets a turn while the dispatcher is suspended
//! waiting for a channel event. The tasks share no lock: the dispatcher
//! owns its event queue outright, and the status task only reads the
//! transport state.
use super::{
    dispatcher::{CommandProcessor, Dispatcher, Outcome},
    status::StatusIndicator,
    traits::Channel,
};
use crate::hal::{led::Toggle, time::Now};

pub struct ResidentSession<'q, C, P, L, T>
where
    C: Channel,
    P: CommandProcessor<C>,
    L: Toggle,
    T: Now,
{
    dispatcher: Dispatcher<'q, C, P, L>,
    status: StatusIndicator<L, T::I>,
    clock: T,
}

impl<'q, C, P, L, T> ResidentSession<'q, C, P, L, T>
where
    C: Channel,
    P: CommandProcessor<C>,
    L: Toggle,
    T: Now,
{
    pub fn new(
        dispatcher: Dispatcher<'q, C, P, L>,
        status: StatusIndicator<L, T::I>,
        clock: T,
    ) -> Self {
        Self { dispatcher, status, clock }
    }

    /// One scheduling pass. Returns the dispatcher's outcome if it had
    /// something to handle, otherwise runs the status task.
    pub fn step(&mut self) -> Option<Outcome> {
        match self.dispatcher.poll() {
            Ok(outcome) => Some(outcome),
            Err(nb::Error::WouldBlock) => {
                self.status.poll(self.clock.now(), self.dispatcher.transport_state());
                None
            }
            Err(nb::Error::Other(never)) => match never {},
        }
    }

    /// Runs both tasks until power loss or an external reset. Sleeps
    /// after every idle pass; channel and SysTick interrupts wake it.
    pub fn run(mut self) -> ! {
        loop {
            if self.step().is_none() {
                #[cfg(target_arch = "arm")]
                cortex_m::asm::wfi();
            }
        }
    }
}
