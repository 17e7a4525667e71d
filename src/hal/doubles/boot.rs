use super::{Journal, Operation};
use crate::hal::{
    boot::{ControlTransfer, EntryPoint},
    memory::ReadWord,
};
use std::collections::BTreeMap;

/// Records the jump, then unwinds in place of leaving the bootloader.
#[derive(Debug, Default)]
pub struct MockJump {
    pub journal: Journal,
}

impl MockJump {
    pub fn new(journal: Journal) -> Self { Self { journal } }
}

impl ControlTransfer for MockJump {
    fn jump_to_user(&mut self, entry: EntryPoint) -> ! {
        self.journal.record(Operation::Jump(entry));
        panic!("Jumped to {:#010x}", entry.0)
    }
}

/// Sparse word-addressed memory. Unwritten words read as erased flash.
#[derive(Debug, Default)]
pub struct FakeMemory {
    words: BTreeMap<u32, u32>,
}

impl FakeMemory {
    pub fn with_word(mut self, address: u32, value: u32) -> Self {
        self.words.insert(address, value);
        self
    }
}

impl ReadWord for FakeMemory {
    fn read_word(&self, address: u32) -> u32 { *self.words.get(&address).unwrap_or(&0xFFFF_FFFF) }
}
