//! Bootloader configuration, aggregated from the per-device settings.
use crate::{
    devices::{status, transport, watchdog},
    hal::boot::EntryPoint,
};

/// Address of the resident application on the reference boards, right
/// after the bootloader's own 16KB of flash.
pub const DEFAULT_ENTRY_POINT: EntryPoint = EntryPoint(0x0800_4000);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub entry_point: EntryPoint,
    pub watchdog: watchdog::config::Config,
    pub transport: transport::config::Config,
    pub status: status::config::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entry_point: DEFAULT_ENTRY_POINT,
            watchdog: Default::default(),
            transport: Default::default(),
            status: Default::default(),
        }
    }
}

impl Config {
    pub fn entry_point(mut self, entry_point: EntryPoint) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn watchdog(mut self, watchdog: watchdog::config::Config) -> Self {
        self.watchdog = watchdog;
        self
    }

    pub fn transport(mut self, transport: transport::config::Config) -> Self {
        self.transport = transport;
        self
    }

    pub fn status(mut self, status: status::config::Config) -> Self {
        self.status = status;
        self
    }
}
