//! Reset and clock control: the reset-cause half of the CSR register.
use crate::{
    hal::reset::{ResetBits, ResetCauseRegister},
    stm32pac::RCC,
};

/// Borrows the RCC block, which stays available for clock setup once
/// the reset cause has been captured.
pub struct ResetFlagsRegister<'a> {
    rcc: &'a RCC,
}

impl<'a> ResetFlagsRegister<'a> {
    pub fn new(rcc: &'a RCC) -> Self { Self { rcc } }
}

impl ResetCauseRegister for ResetFlagsRegister<'_> {
    fn read_reset_cause(&self) -> ResetBits {
        let csr = self.rcc.csr.read();
        ResetBits { watchdog: csr.iwdgrstf().bit_is_set(), software: csr.sftrstf().bit_is_set() }
    }

    fn clear_reset_cause(&mut self) { self.rcc.csr.modify(|_, w| w.rmvf().set_bit()); }
}
