//! Full project ports for specific targets. They mainly
//! provide a method to construct a generic bootloader from
//! specific parts.

#[cfg(all(target_arch = "arm", feature = "stm32f303"))]
port!(stm32f303_discovery);
