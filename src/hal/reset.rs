//! Reset-cause register interface.

/// The reset-cause bits the bootloader acts upon. Any other cause
/// (power-on, pin reset, brown-out) is a normal boot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ResetBits {
    /// Independent watchdog expired before the last reset.
    pub watchdog: bool,
    /// Firmware requested the last reset.
    pub software: bool,
}

/// Hardware register recording why the most recent reset occurred.
pub trait ResetCauseRegister {
    fn read_reset_cause(&self) -> ResetBits;

    /// Clears every recorded cause, so nothing leaks into the
    /// decision of the next boot.
    fn clear_reset_cause(&mut self);
}
