//! Vector table reads and the hand over to the application.
use crate::hal::{
    boot::{ControlTransfer, EntryPoint},
    memory::ReadWord,
};
use cortex_m::peripheral::SCB;

/// Direct reads from the memory map.
pub struct MemoryMap;

impl ReadWord for MemoryMap {
    fn read_word(&self, address: u32) -> u32 {
        // NOTE(Safety): Callers only pass aligned addresses inside the
        // internal flash, which is always readable.
        unsafe { core::ptr::read_volatile(address as *const u32) }
    }
}

/// Relocates the vector table to the application's and branches to
/// its reset handler with its initial stack pointer.
pub struct VectorTableJump {
    scb: SCB,
}

impl VectorTableJump {
    pub fn new(scb: SCB) -> Self { Self { scb } }
}

impl ControlTransfer for VectorTableJump {
    fn jump_to_user(&mut self, entry: EntryPoint) -> ! {
        // NOTE(Safety): Only reachable after the image at `entry` passed
        // validation; nothing of the bootloader runs past this point.
        unsafe {
            self.scb.vtor.write(entry.0);
            cortex_m::asm::bootload(entry.0 as *const u32)
        }
    }
}
