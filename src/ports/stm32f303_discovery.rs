//! Bootloader construction for the STM32F303 Discovery board.
//!
//! The data channel driver and the command processor live outside this
//! crate, so the port stops at handing out the board specific parts.
//! A board binary strings them together:
//!
//! ```ignore
//! static EVENTS: EventFlags = EventFlags::new();
//!
//! let peripherals = stm32pac::Peripherals::take().unwrap();
//! let core = cortex_m::Peripherals::take().unwrap();
//! let resident = arbitrate(&peripherals.RCC, peripherals.IWDG, core.SCB, Config::default());
//! let parts = ResidentParts::new(peripherals.GPIOE, &peripherals.RCC, core.SYST);
//! let (producer, events) = EVENTS.split();
//! let channel = usb_bulk::Channel::new(peripherals.USB, producer);
//! run(resident, parts, channel, events, processor)
//! ```
use crate::{
    config::Config,
    devices::{
        bootloader::{Bootloader, Resident},
        dispatcher::{CommandProcessor, Indicators},
        image::VectorTableValidator,
        led::{Led, Logic},
        traits::Channel,
    },
    drivers::{
        boot::{MemoryMap, VectorTableJump},
        gpio::{IndicatorPins, PortEPin},
        iwdg::Iwdg,
        rcc::ResetFlagsRegister,
        systick::SysTickClock,
    },
    hal::{channel::EventReceiver, time::Hertz},
    stm32pac::{GPIOE, IWDG, RCC},
};
use core::ops::Range;
use cortex_m::peripheral::{SCB, SYST};
use defmt_rtt as _;

/// Reset default: the internal 8MHz oscillator.
pub const SYSCLK: Hertz = Hertz(8_000_000);
/// The 40KB of SRAM an application stack pointer may point into.
pub const RAM: Range<u32> = 0x2000_0000..0x2000_A000;
/// Flash left over for the application after the bootloader.
pub const APPLICATION_FLASH: Range<u32> = 0x0800_4000..0x0804_0000;

pub type Indicator = Led<PortEPin>;
pub type DiscoveryBootloader<'a> =
    Bootloader<ResetFlagsRegister<'a>, VectorTableValidator<MemoryMap>, Iwdg, VectorTableJump>;

/// Runs arbitration for this boot. Returns only to stay resident.
pub fn arbitrate(rcc: &RCC, iwdg: IWDG, scb: SCB, config: Config) -> Resident {
    DiscoveryBootloader::new(
        ResetFlagsRegister::new(rcc),
        VectorTableValidator::new(MemoryMap, RAM, APPLICATION_FLASH),
        Iwdg::new(iwdg),
        VectorTableJump::new(scb),
        config,
    )
    .arbitrate()
}

/// Parts that only exist while the bootloader is resident.
pub struct ResidentParts {
    pub indicators: Indicators<Indicator>,
    pub status: Indicator,
    pub clock: SysTickClock,
}

impl ResidentParts {
    /// LD3 shows the status blink, LD10 command activity, LD4 and LD8
    /// the rejected and accepted command diagnostics.
    pub fn new(gpioe: GPIOE, rcc: &RCC, syst: SYST) -> Self {
        let pins = IndicatorPins::new(gpioe, rcc);
        Self {
            indicators: Indicators {
                activity: Led::new(pins.pe13, Logic::Direct),
                rejected: Led::new(pins.pe8, Logic::Direct),
                accepted: Led::new(pins.pe14, Logic::Direct),
            },
            status: Led::new(pins.pe9, Logic::Direct),
            clock: SysTickClock::init(syst, SYSCLK),
        }
    }
}

pub fn run<C, P>(
    resident: Resident,
    parts: ResidentParts,
    channel: C,
    events: EventReceiver<'static>,
    processor: P,
) -> !
where
    C: Channel,
    P: CommandProcessor<C>,
{
    resident.run(channel, events, processor, parts.indicators, parts.status, parts.clock)
}
