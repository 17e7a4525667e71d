//! Diagnostic indicators.
use crate::hal::{gpio::OutputPin, led::Toggle};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Logic {
    /// Logical high equals "on"
    Direct,
    /// Logical high equals "off"
    Inverted,
}

/// Solid (non-blinking) single colour LED driven by one output pin.
///
/// # Example
/// ```
/// # use bulkboot_lib::devices::led::*;
/// # use bulkboot_lib::hal::{led::Toggle, doubles::gpio::MockPin};
/// let pin = MockPin::default();
/// let mut led = Led::new(pin.clone(), Logic::Inverted);
/// assert!(pin.is_high());
///
/// led.toggle();
/// assert!(led.is_on());
/// assert!(pin.is_low());
/// ```
pub struct Led<Pin: OutputPin> {
    pin: Pin,
    is_on: bool,
    logic: Logic,
}

impl<Pin: OutputPin> Led<Pin> {
    /// Takes over the pin, starting with the LED off.
    pub fn new(pin: Pin, logic: Logic) -> Self {
        let mut led = Self { pin, is_on: true, logic };
        led.off();
        led
    }

    pub fn is_on(&self) -> bool { self.is_on }

    fn drive(&mut self, on: bool) {
        match (on, self.logic) {
            (true, Logic::Direct) | (false, Logic::Inverted) => self.pin.set_high(),
            (false, Logic::Direct) | (true, Logic::Inverted) => self.pin.set_low(),
        }
        self.is_on = on;
    }
}

impl<Pin: OutputPin> Toggle for Led<Pin> {
    fn on(&mut self) {
        if !self.is_on {
            self.drive(true);
        }
    }

    fn off(&mut self) {
        if self.is_on {
            self.drive(false);
        }
    }

    fn toggle(&mut self) { self.drive(!self.is_on) }
}
