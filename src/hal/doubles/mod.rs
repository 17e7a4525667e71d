//! Simulated hardware backends for host testing.
//!
//! Every double that stands in for a hardware side effect writes to a
//! shared `Journal`, so tests can assert the exact order in which the
//! core touched the hardware.
use super::{boot::EntryPoint, time::Milliseconds, watchdog::Prescaler};
use std::{cell::RefCell, rc::Rc, vec::Vec};

pub mod boot;
pub mod channel;
pub mod error;
pub mod gpio;
pub mod reset;
pub mod time;
pub mod watchdog;

/// A hardware-facing operation, as recorded by the doubles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    ReadResetCause,
    ClearResetCause,
    CheckUserCode(EntryPoint),
    WatchdogWriteAccess,
    WatchdogPrescaler(Prescaler),
    WatchdogReload(u16),
    WatchdogEnable,
    Jump(EntryPoint),
    Disconnect,
    Start,
    Connect,
    Stop,
    Read { length: usize, timeout: Milliseconds },
    Wait(Milliseconds),
}

#[derive(Clone, Debug, Default)]
pub struct Journal(Rc<RefCell<Vec<Operation>>>);

impl Journal {
    pub fn record(&self, operation: Operation) { self.0.borrow_mut().push(operation) }
    pub fn operations(&self) -> Vec<Operation> { self.0.borrow().clone() }
    pub fn count(&self, operation: Operation) -> usize {
        self.0.borrow().iter().filter(|&&o| o == operation).count()
    }
    pub fn position(&self, operation: Operation) -> Option<usize> {
        self.0.borrow().iter().position(|&o| o == operation)
    }
    pub fn clear(&self) { self.0.borrow_mut().clear() }
}
