//! Convenience macros for the bootloader project
#![macro_use]

/// Declares a board or driver module and pulls its namespace into the
/// current one, so the declaration and reexport sit under a single
/// configuration flag.
///
/// # Example
/// ```ignore
/// #[cfg(feature = "stm32f303")]
/// port!(stm32f303_discovery);
/// // Expands into:
/// pub mod stm32f303_discovery;
/// pub use self::stm32f303_discovery::*;
///
/// #[cfg(feature = "stm32f303")]
/// port!(stm32f3: [rcc, iwdg,]);
/// // Expands into:
/// pub mod stm32f3 { pub mod rcc; pub mod iwdg; }
/// pub use self::stm32f3::rcc;
/// pub use self::stm32f3::iwdg;
/// ```
#[macro_export]
macro_rules! port {
    ($mod:ident) => {
        pub mod $mod;
        pub use self::$mod::*;
    };
    ($outer:ident: [$($inner:ident,)+]) => {
        pub mod $outer {
        $(
            pub mod $inner;
        )+
        }
        $(
            pub use self::$outer::$inner;
        )+
    };
}
