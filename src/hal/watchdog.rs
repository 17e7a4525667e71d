//! Independent watchdog peripheral interface.

/// Largest value accepted by the 12 bit reload register.
pub const MAX_RELOAD: u16 = 0x0FFF;

/// Divisor applied to the watchdog reference clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Prescaler {
    Div4,
    Div8,
    Div16,
    Div32,
    Div64,
    Div128,
    Div256,
}

impl Prescaler {
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Div4 => 4,
            Prescaler::Div8 => 8,
            Prescaler::Div16 => 16,
            Prescaler::Div32 => 32,
            Prescaler::Div64 => 64,
            Prescaler::Div128 => 128,
            Prescaler::Div256 => 256,
        }
    }

    /// Value of the prescaler register field.
    pub const fn bits(self) -> u8 {
        match self {
            Prescaler::Div4 => 0,
            Prescaler::Div8 => 1,
            Prescaler::Div16 => 2,
            Prescaler::Div32 => 3,
            Prescaler::Div64 => 4,
            Prescaler::Div128 => 5,
            Prescaler::Div256 => 6,
        }
    }
}

/// Raw access to a watchdog that, once enabled, can only be stopped
/// by a reset. Sequencing and the one-way guarantee live in
/// `devices::watchdog`. No step may block: the reference clock may not
/// run until `enable` starts it.
pub trait IndependentWatchdog {
    fn enable_write_access(&mut self);
    fn set_prescaler(&mut self, prescaler: Prescaler);
    fn set_reload(&mut self, reload: u16);
    fn enable(&mut self);
}
