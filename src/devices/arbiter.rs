//! Boot arbitration.
//!
//! Decides, exactly once per boot, between staying resident to receive
//! an update and handing control to the resident application. Policy,
//! first match wins:
//!
//! * Watchdog timeout: the application crashed last time. Stay resident.
//! * Software request: the application asked for the bootloader. Stay resident.
//! * Normal reset without a valid image: nothing to run. Stay resident.
//! * Normal reset with a valid image: arm the watchdog, then transfer control.
use super::{
    image::ImageValidator,
    reset_cause::{ResetCause, ResetFlags},
    watchdog::{self, Armed, Disarmed, Watchdog},
};
use crate::{
    hal::{boot::EntryPoint, reset::ResetCauseRegister, watchdog::IndependentWatchdog},
    log::info,
};

/// Outcome of the pure boot policy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum Decision {
    StayResident,
    TransferControl(EntryPoint),
}

/// Outcome of a full arbitration, carrying what each path needs next.
pub enum Boot<W: IndependentWatchdog> {
    /// Stay in bootloader mode; the flags go to the command protocol.
    Resident(ResetFlags),
    /// Jump to the application. The watchdog is already counting.
    Transfer { entry: EntryPoint, watchdog: Watchdog<W, Armed> },
}

pub struct BootArbiter {
    entry: EntryPoint,
}

impl BootArbiter {
    pub fn new(entry: EntryPoint) -> Self { Self { entry } }

    pub fn decide(&self, cause: ResetCause, image_valid: bool) -> Decision {
        match (cause, image_valid) {
            (ResetCause::WatchdogTimeout, _) => Decision::StayResident,
            (ResetCause::SoftwareRequested, _) => Decision::StayResident,
            (ResetCause::Normal, false) => Decision::StayResident,
            (ResetCause::Normal, true) => Decision::TransferControl(self.entry),
        }
    }

    /// Snapshots and clears the reset cause, applies the policy, and arms
    /// the watchdog on the transfer path. The image is only inspected
    /// after a normal reset.
    pub fn arbitrate<R, V, W>(
        &self,
        register: &mut R,
        validator: &V,
        watchdog: Watchdog<W, Disarmed>,
        config: &watchdog::config::Config,
    ) -> Boot<W>
    where
        R: ResetCauseRegister,
        V: ImageValidator,
        W: IndependentWatchdog,
    {
        let cause = ResetCause::capture(register);
        let image_valid = cause == ResetCause::Normal && validator.check_user_code(self.entry);

        match self.decide(cause, image_valid) {
            Decision::StayResident => {
                info!("Staying resident");
                Boot::Resident(ResetFlags::from(cause))
            }
            Decision::TransferControl(entry) => {
                Boot::Transfer { entry, watchdog: watchdog.arm(config) }
            }
        }
    }
}
