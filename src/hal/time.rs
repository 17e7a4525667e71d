//! Time units and clock interfaces.
use core::ops::{Add as Adds, Sub as Subtracts};

/// Abstract point in time.
///
/// Any implementer of Instant can be subtracted with
/// itself to obtain a span of milliseconds, and added
/// with milliseconds to obtain another instant.
pub trait Instant
where
    Self: Copy + Clone,
    Self: Subtracts<Output = Milliseconds>,
    Self: Adds<Milliseconds, Output = Self>,
{
}

/// Source of the current time.
pub trait Now {
    type I: Instant;
    fn now(&self) -> Self::I;
}

/// Suspends the caller for a period of time.
pub trait Wait {
    fn wait(&mut self, period: Milliseconds);
}

#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq, Default)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Milliseconds(pub u32);

/// Hertz
#[derive(Clone, Copy, Debug, PartialOrd, Ord, PartialEq, Eq)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub struct Hertz(pub u32);
