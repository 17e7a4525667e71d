//! # Field Update Bootloader Library
//!
//! Control core of a field-update bootloader: on every reset it decides
//! whether to hand control to the resident application or to stay
//! resident and accept update commands over a host-driven bulk channel.
//! All functionality lives here in library form; board specifics are
//! confined to the `drivers` and `ports` modules.
#![cfg_attr(test, allow(unused_imports))]
#![cfg_attr(target_arch = "arm", no_std)]

#[cfg(all(target_arch = "arm", feature = "stm32f303"))]
pub use stm32f3::stm32f303 as stm32pac;

extern crate static_assertions;

#[cfg(target_arch = "arm")]
use panic_semihosting as _;

#[cfg(target_arch = "arm")]
pub(crate) use defmt as log;

/// Logging shim for host builds. Mirrors the `defmt` macro names so
/// device code logs the same way regardless of target.
#[cfg(not(target_arch = "arm"))]
pub(crate) mod log {
    macro_rules! info {
        ($fmt:literal $(, $arg:expr)* $(,)?) => {{
            $( let _ = &$arg; )*
        }};
    }
    pub(crate) use info;
    macro_rules! debug {
        ($fmt:literal $(, $arg:expr)* $(,)?) => {{
            $( let _ = &$arg; )*
        }};
    }
    pub(crate) use debug;
    macro_rules! warner {
        ($fmt:literal $(, $arg:expr)* $(,)?) => {{
            $( let _ = &$arg; )*
        }};
    }
    pub(crate) use warner as warn;
}

#[macro_use]
pub mod utilities {
    mod macros;
}

pub mod config;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod ports;
