use crate::hal::gpio::OutputPin;
use std::{cell::RefCell, rc::Rc, vec::Vec};

/// Output pin recording every level it is driven to. Clones share the
/// same record, so a test can keep a handle on a pin it moved away.
#[derive(Clone, Debug, Default)]
pub struct MockPin {
    changes: Rc<RefCell<Vec<bool>>>,
}

impl MockPin {
    pub fn is_high(&self) -> bool { self.changes.borrow().last().copied().unwrap_or(false) }
    pub fn is_low(&self) -> bool { !self.is_high() }
    pub fn changes(&self) -> Vec<bool> { self.changes.borrow().clone() }
}

impl OutputPin for MockPin {
    fn set_low(&mut self) { self.changes.borrow_mut().push(false) }
    fn set_high(&mut self) { self.changes.borrow_mut().push(true) }
}
