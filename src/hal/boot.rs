//! Control transfer to the resident application.

/// Address of the resident application's vector table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct EntryPoint(pub u32);

impl From<EntryPoint> for u32 {
    fn from(entry: EntryPoint) -> u32 { entry.0 }
}

/// Hands the processor over to another image. On success nothing of
/// the bootloader runs afterwards.
pub trait ControlTransfer {
    fn jump_to_user(&mut self, entry: EntryPoint) -> !;
}
