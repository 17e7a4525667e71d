//! Indicator outputs on port E, where the Discovery board wires its
//! eight user LEDs (PE8 to PE15).
use crate::{
    hal::gpio::OutputPin,
    stm32pac::{GPIOE, RCC},
};

/// Push pull output on port E. Pins are independent: all writes go
/// through the atomic set/reset register.
pub struct PortEPin {
    index: u8,
}

/// The port E pins used as indicators.
pub struct IndicatorPins {
    pub pe8: PortEPin,
    pub pe9: PortEPin,
    pub pe13: PortEPin,
    pub pe14: PortEPin,
}

impl IndicatorPins {
    /// Clocks port E and configures the indicator pins as outputs.
    pub fn new(gpioe: GPIOE, rcc: &RCC) -> Self {
        rcc.ahbenr.modify(|_, w| w.iopeen().set_bit());

        let (clear, set) = [8u32, 9, 13, 14].iter().fold((0u32, 0u32), |(clear, set), pin| {
            (clear | (0b11u32 << (2 * pin)), set | (0b01u32 << (2 * pin)))
        });
        // NOTE(Safety): Only the mode bits of the indicator pins change.
        gpioe.moder.modify(|r, w| unsafe { w.bits((r.bits() & !clear) | set) });

        Self {
            pe8: PortEPin { index: 8 },
            pe9: PortEPin { index: 9 },
            pe13: PortEPin { index: 13 },
            pe14: PortEPin { index: 14 },
        }
    }
}

impl PortEPin {
    fn write_bsrr(&mut self, bits: u32) {
        // NOTE(Safety): BSRR writes are atomic and only touch the bits
        // set, and each pin is the only owner of its bit.
        unsafe { (*GPIOE::ptr()).bsrr.write(|w| w.bits(bits)) }
    }
}

impl OutputPin for PortEPin {
    fn set_low(&mut self) { self.write_bsrr(1u32 << (self.index as u32 + 16)) }
    fn set_high(&mut self) { self.write_bsrr(1u32 << self.index as u32) }
}
