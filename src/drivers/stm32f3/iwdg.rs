//! Independent watchdog. Once started, it can only be stopped by a
//! reset.
//!
//! Writes never wait on the PVU/RVU status flags: those only clear
//! once LSI runs, and starting the counter is what turns LSI on.
use crate::{
    hal::watchdog::{IndependentWatchdog, Prescaler},
    stm32pac::IWDG,
};

const KEY_ENABLE_ACCESS: u32 = 0x5555;
const KEY_START: u32 = 0xCCCC;

pub struct Iwdg {
    iwdg: IWDG,
}

impl Iwdg {
    pub fn new(iwdg: IWDG) -> Self { Self { iwdg } }
}

impl IndependentWatchdog for Iwdg {
    fn enable_write_access(&mut self) {
        // NOTE(Safety): Fixed key accepted by the write-only key register.
        self.iwdg.kr.write(|w| unsafe { w.bits(KEY_ENABLE_ACCESS) });
    }

    fn set_prescaler(&mut self, prescaler: Prescaler) {
        // NOTE(Safety): `bits` covers exactly the 3 bit PR field.
        self.iwdg.pr.write(|w| unsafe { w.bits(prescaler.bits() as u32) });
    }

    fn set_reload(&mut self, reload: u16) {
        // NOTE(Safety): Reload is bounded by `MAX_RELOAD` on construction
        // of the watchdog configuration.
        self.iwdg.rlr.write(|w| unsafe { w.bits(reload as u32) });
    }

    fn enable(&mut self) {
        // NOTE(Safety): Fixed key accepted by the write-only key register.
        self.iwdg.kr.write(|w| unsafe { w.bits(KEY_START) });
    }
}
