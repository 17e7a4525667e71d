use super::{Journal, Operation};
use crate::hal::reset::{ResetBits, ResetCauseRegister};

/// Reset-cause register holding whatever bits the test seeds it with.
#[derive(Debug, Default)]
pub struct FakeResetRegister {
    pub bits: ResetBits,
    pub journal: Journal,
}

impl FakeResetRegister {
    pub fn new(bits: ResetBits, journal: Journal) -> Self { Self { bits, journal } }
}

impl ResetCauseRegister for FakeResetRegister {
    fn read_reset_cause(&self) -> ResetBits {
        self.journal.record(Operation::ReadResetCause);
        self.bits
    }

    fn clear_reset_cause(&mut self) {
        self.journal.record(Operation::ClearResetCause);
        self.bits = ResetBits::default();
    }
}
