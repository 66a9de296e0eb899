//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter with no mapping to wall
//! clock: a tick is a logical, unit-less step.  Every movement, wrap stage,
//! and allocator pass consumes exactly one tick, so all latency arithmetic is
//! exact integer subtraction.

use std::fmt;

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at one tick per nanosecond a u64 lasts ~585 years, far
/// longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Advance to the next tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// Saturates at zero if `earlier` is in the future.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
