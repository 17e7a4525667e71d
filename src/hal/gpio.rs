//! # Simple GPIO interface
//!
//! Indicator outputs are the only pins the bootloader core drives, so
//! only the output half is modelled. Board drivers implement it for
//! whatever pin representation they use.

/// Interface to a writable pin.
pub trait OutputPin {
    fn set_low(&mut self);
    fn set_high(&mut self);
}
