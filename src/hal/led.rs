//! LED interfaces
//!
//! The bootloader only ever switches its indicators on, off, or
//! flips them; colour and blink control are left to the board.

/// Interface to a LED's direct on/off/toggle operations.
pub trait Toggle {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);
}
