//! Millisecond clock driven by the SysTick exception.
use crate::hal::time::{self, Hertz, Milliseconds};
use core::sync::atomic::{AtomicU32, Ordering};
use cortex_m::peripheral::{syst::SystClkSource, SYST};
use cortex_m_rt::exception;

static TICKS: AtomicU32 = AtomicU32::new(0);

#[exception]
fn SysTick() { TICKS.fetch_add(1, Ordering::Relaxed); }

/// Opaque wrapper around a millisecond tick count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick(u32);

impl time::Instant for Tick {}

impl core::ops::Sub for Tick {
    type Output = Milliseconds;
    fn sub(self, rhs: Self) -> Milliseconds { Milliseconds(self.0.wrapping_sub(rhs.0)) }
}

impl<T: Into<Milliseconds>> core::ops::Add<T> for Tick {
    type Output = Self;
    fn add(self, rhs: T) -> Self { Tick(self.0.wrapping_add(rhs.into().0)) }
}

/// Owns the SysTick peripheral. Clones share the same counter.
#[derive(Clone)]
pub struct SysTickClock {
    _marker: (),
}

impl SysTickClock {
    pub fn init(mut syst: SYST, sysclk: Hertz) -> Self {
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(sysclk.0 / 1000 - 1);
        syst.clear_current();
        syst.enable_interrupt();
        syst.enable_counter();
        Self { _marker: () }
    }
}

impl time::Now for SysTickClock {
    type I = Tick;
    fn now(&self) -> Tick { Tick(TICKS.load(Ordering::Relaxed)) }
}

impl time::Wait for SysTickClock {
    fn wait(&mut self, period: Milliseconds) {
        let start = time::Now::now(self);
        while time::Now::now(self) - start < period {
            cortex_m::asm::wfi();
        }
    }
}
