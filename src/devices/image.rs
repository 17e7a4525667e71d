//! Resident image validation.
//!
//! The bootloader never modifies the resident application; it only
//! decides whether the image at the entry point looks runnable.
use crate::hal::{boot::EntryPoint, memory::ReadWord};
use core::ops::Range;

/// Decides whether the image at an entry point is fit to run.
pub trait ImageValidator {
    fn check_user_code(&self, entry: EntryPoint) -> bool;
}

/// Erased flash reads as all ones.
const ERASED_WORD: u32 = 0xFFFF_FFFF;

/// Sanity check of a Cortex-M vector table: the initial stack pointer
/// must point into SRAM, and the reset handler must be a Thumb address
/// inside the application's flash region.
pub struct VectorTableValidator<M: ReadWord> {
    memory: M,
    ram: Range<u32>,
    flash: Range<u32>,
}

impl<M: ReadWord> VectorTableValidator<M> {
    pub fn new(memory: M, ram: Range<u32>, flash: Range<u32>) -> Self {
        Self { memory, ram, flash }
    }
}

impl<M: ReadWord> ImageValidator for VectorTableValidator<M> {
    fn check_user_code(&self, entry: EntryPoint) -> bool {
        let initial_stack_pointer = self.memory.read_word(entry.0);
        let reset_handler = self.memory.read_word(entry.0 + 4);

        // The stack grows down from the pointer, so the top of RAM itself is valid.
        let stack_valid = initial_stack_pointer > self.ram.start
            && initial_stack_pointer <= self.ram.end
            && initial_stack_pointer & 0b11 == 0;
        let handler_address = reset_handler & !1;
        let handler_valid = reset_handler != ERASED_WORD
            && reset_handler & 1 == 1
            && handler_address > entry.0
            && self.flash.contains(&handler_address);

        stack_valid && handler_valid
    }
}
