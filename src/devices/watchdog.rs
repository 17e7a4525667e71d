//! One-way watchdog guard.
//!
//! A `Watchdog` starts `Disarmed` and can be armed exactly once: `arm`
//! consumes the disarmed guard and hands back an `Armed` one that has no
//! way back, so double-arming is a compile error rather than a runtime
//! check. Refreshing after arming is the resident application's job.
use crate::{
    error::Error,
    hal::{
        time::{Hertz, Milliseconds},
        watchdog::{IndependentWatchdog, Prescaler, MAX_RELOAD},
    },
    log::info,
};

/// Observable state of the guard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum WatchdogState {
    Disarmed,
    Armed { timeout_ticks: u16 },
}

pub mod config {
    //! Timing of the independent watchdog.
    //!
    //! # Example
    //! ```
    //! # use bulkboot_lib::devices::watchdog::config::Config;
    //! # use bulkboot_lib::hal::{time::Hertz, watchdog::Prescaler};
    //! let config = Config::new(Hertz(40_000), Prescaler::Div64, 500).unwrap();
    //! assert_eq!(500, config.timeout_ticks());
    //! ```
    use super::*;

    /// Reference (LSI) clock frequency of the watchdog.
    pub const REFERENCE_FREQUENCY: Hertz = Hertz(42_000);
    /// Default reload: a fixed fraction of the reference frequency.
    pub const DEFAULT_RELOAD: u16 = (REFERENCE_FREQUENCY.0 / 128) as u16;

    static_assertions::const_assert!(DEFAULT_RELOAD <= MAX_RELOAD);

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Config {
        reference: Hertz,
        prescaler: Prescaler,
        reload: u16,
    }

    impl Default for Config {
        fn default() -> Self {
            Self {
                reference: REFERENCE_FREQUENCY,
                prescaler: Prescaler::Div32,
                reload: DEFAULT_RELOAD,
            }
        }
    }

    impl Config {
        pub const fn new(
            reference: Hertz,
            prescaler: Prescaler,
            reload: u16,
        ) -> Result<Self, Error> {
            if reload > MAX_RELOAD || reload == 0 {
                Err(Error::WatchdogReloadOutOfRange)
            } else {
                Ok(Self { reference, prescaler, reload })
            }
        }

        pub fn prescaler(&self) -> Prescaler { self.prescaler }

        /// Reload value, in prescaled ticks.
        pub fn timeout_ticks(&self) -> u16 { self.reload }

        /// Wall-clock time the application has to refresh the watchdog.
        pub fn timeout(&self) -> Milliseconds {
            let millis = (self.reload as u64 * self.prescaler.divisor() as u64 * 1000)
                / self.reference.0 as u64;
            Milliseconds(millis as u32)
        }
    }
}

mod private {
    #[doc(hidden)]
    pub trait Sealed {}
}

/// Typestate of the guard. Sealed; only `Disarmed` and `Armed` exist.
pub trait State: private::Sealed {
    fn report(&self) -> WatchdogState;
}

pub struct Disarmed;

pub struct Armed {
    timeout_ticks: u16,
}

impl private::Sealed for Disarmed {}
impl private::Sealed for Armed {}

impl State for Disarmed {
    fn report(&self) -> WatchdogState { WatchdogState::Disarmed }
}

impl State for Armed {
    fn report(&self) -> WatchdogState { WatchdogState::Armed { timeout_ticks: self.timeout_ticks } }
}

pub struct Watchdog<W: IndependentWatchdog, S: State> {
    hardware: W,
    state: S,
}

impl<W: IndependentWatchdog, S: State> Watchdog<W, S> {
    pub fn state(&self) -> WatchdogState { self.state.report() }
}

impl<W: IndependentWatchdog> Watchdog<W, Disarmed> {
    pub fn new(hardware: W) -> Self { Self { hardware, state: Disarmed } }

    /// Irreversibly starts the hardware countdown.
    pub fn arm(mut self, config: &config::Config) -> Watchdog<W, Armed> {
        let timeout_ticks = config.timeout_ticks();
        self.hardware.enable_write_access();
        self.hardware.set_prescaler(config.prescaler());
        self.hardware.set_reload(timeout_ticks);
        self.hardware.enable();
        info!("Watchdog armed: {} ticks ({} ms)", timeout_ticks, config.timeout().0);
        Watchdog { hardware: self.hardware, state: Armed { timeout_ticks } }
    }
}
