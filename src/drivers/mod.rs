//! Driver implementations for all supported platforms. They offer
//! a safe API over the raw peripheral access crates, and implement
//! the capability interfaces in `hal`.

#[cfg(all(target_arch = "arm", feature = "stm32f303"))]
port!(stm32f3: [rcc, iwdg, gpio, systick, boot,]);
