//! Raw memory access for image inspection.

/// Reads aligned 32 bit words from the memory map.
pub trait ReadWord {
    fn read_word(&self, address: u32) -> u32;
}
