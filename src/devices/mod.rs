//! Modules with the business logic of the bootloader, laid on top
//! of the abstract `hal` interfaces. Devices are generic, while board
//! specifics (pins, registers, clocks) are handled in the `ports` and
//! `drivers` modules.

pub mod arbiter;
pub mod bootloader;
pub mod dispatcher;
pub mod image;
pub mod led;
pub mod reset_cause;
pub mod session;
pub mod status;
pub mod transport;
pub mod watchdog;

/// General purpose traits that summarize requirements on devices.
pub mod traits {
    use crate::hal::channel::{Link, TimeoutRead};
    use marker_blanket::marker_blanket;

    /// A supported data channel must be able to run the session
    /// lifecycle and perform bounded reads.
    #[marker_blanket]
    pub trait Channel: Link + TimeoutRead {}
}
