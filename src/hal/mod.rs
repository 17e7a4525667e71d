//! Hardware Abstraction Layer, containing the capability
//! interfaces the bootloader core needs from the board.
//!
//! Everything the core touches on the hardware side (reset-cause
//! register, independent watchdog, data channel, indicator pins,
//! control transfer) goes through these traits, so the core runs
//! unchanged against the simulated backends in `doubles`.
#![macro_use]

pub mod boot;
pub mod channel;
pub mod gpio;
pub mod led;
pub mod memory;
pub mod reset;
pub mod time;
pub mod watchdog;

#[cfg(not(target_arch = "arm"))]
#[doc(hidden)]
pub mod doubles;
