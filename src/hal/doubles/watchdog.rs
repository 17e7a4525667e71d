use super::{Journal, Operation};
use crate::hal::watchdog::{IndependentWatchdog, Prescaler};

#[derive(Debug, Default)]
pub struct MockWatchdog {
    pub journal: Journal,
}

impl MockWatchdog {
    pub fn new(journal: Journal) -> Self { Self { journal } }
}

impl IndependentWatchdog for MockWatchdog {
    fn enable_write_access(&mut self) { self.journal.record(Operation::WatchdogWriteAccess) }
    fn set_prescaler(&mut self, prescaler: Prescaler) {
        self.journal.record(Operation::WatchdogPrescaler(prescaler))
    }
    fn set_reload(&mut self, reload: u16) { self.journal.record(Operation::WatchdogReload(reload)) }
    fn enable(&mut self) { self.journal.record(Operation::WatchdogEnable) }
}
