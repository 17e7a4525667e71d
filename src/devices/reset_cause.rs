//! Reset cause snapshot.
//!
//! The reset-cause register is read exactly once per boot, and cleared
//! straight after, so stale bits never reach the decision of a later
//! boot. Everything downstream works on the immutable snapshot.
use crate::{
    hal::reset::{ResetBits, ResetCauseRegister},
    log::info,
};
use bitflags::bitflags;

/// Why the device came out of reset, as far as the bootloader cares.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ResetCause {
    /// The resident application failed to refresh the watchdog in time.
    WatchdogTimeout,
    /// The resident application asked to re-enter the bootloader.
    SoftwareRequested,
    /// Power-on, pin reset, or anything else.
    Normal,
}

impl From<ResetBits> for ResetCause {
    /// A watchdog expiry takes precedence over a software request.
    fn from(bits: ResetBits) -> Self {
        if bits.watchdog {
            ResetCause::WatchdogTimeout
        } else if bits.software {
            ResetCause::SoftwareRequested
        } else {
            ResetCause::Normal
        }
    }
}

impl ResetCause {
    /// Takes the snapshot and clears the hardware register.
    pub fn capture<R: ResetCauseRegister>(register: &mut R) -> Self {
        let cause = Self::from(register.read_reset_cause());
        register.clear_reset_cause();
        info!("Reset cause: {:?}", cause);
        cause
    }
}

bitflags! {
    /// Reset cause restated for the command protocol, so a connected
    /// host can learn why the device is in bootloader mode. Built once
    /// before the resident tasks start and never modified afterwards.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ResetFlags: u8 {
        /// Bootloader is resident and serving commands.
        const OK = 1 << 0;
        const WATCHDOG_RESET = 1 << 1;
        const SOFTWARE_RESET = 1 << 2;
    }
}

impl From<ResetCause> for ResetFlags {
    fn from(cause: ResetCause) -> Self {
        match cause {
            ResetCause::WatchdogTimeout => ResetFlags::OK | ResetFlags::WATCHDOG_RESET,
            ResetCause::SoftwareRequested => ResetFlags::OK | ResetFlags::SOFTWARE_RESET,
            ResetCause::Normal => ResetFlags::OK,
        }
    }
}
