use super::{Journal, Operation};
use crate::hal::time::{self, Milliseconds};
use std::{cell::Cell, rc::Rc};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u32);

impl time::Instant for MockInstant {}

impl core::ops::Sub for MockInstant {
    type Output = Milliseconds;
    fn sub(self, rhs: Self) -> Self::Output { Milliseconds(self.0.wrapping_sub(rhs.0)) }
}

impl core::ops::Add<Milliseconds> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Milliseconds) -> Self { MockInstant(self.0.wrapping_add(rhs.0)) }
}

/// Simulated millisecond clock. Time only moves when a test advances
/// it or when someone waits on it.
#[derive(Clone, Debug, Default)]
pub struct MockClock {
    pub journal: Journal,
    now: Rc<Cell<u32>>,
}

impl MockClock {
    pub fn new(journal: Journal) -> Self { Self { journal, now: Rc::new(Cell::new(0)) } }
    pub fn advance(&self, period: Milliseconds) {
        self.now.set(self.now.get().wrapping_add(period.0))
    }
}

impl time::Now for MockClock {
    type I = MockInstant;
    fn now(&self) -> MockInstant { MockInstant(self.now.get()) }
}

impl time::Wait for MockClock {
    fn wait(&mut self, period: Milliseconds) {
        self.journal.record(Operation::Wait(period));
        self.advance(period);
    }
}
