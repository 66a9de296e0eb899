//! Building geometry: floor indices and the building description.

use std::fmt;

// ── Floor ─────────────────────────────────────────────────────────────────────

/// A floor index, counted from the ground floor up.
///
/// Floors are plain ordinals — no height, no travel-time weighting.  All
/// movement in the simulation is one floor per tick, so `toward` is the only
/// step primitive the rest of the workspace needs.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor(pub u32);

impl Floor {
    pub const GROUND: Floor = Floor(0);

    /// The floor one step closer to `target`, or `self` when already there.
    #[inline]
    pub fn toward(self, target: Floor) -> Floor {
        match self.0.cmp(&target.0) {
            std::cmp::Ordering::Less    => Floor(self.0 + 1),
            std::cmp::Ordering::Greater => Floor(self.0 - 1),
            std::cmp::Ordering::Equal   => self,
        }
    }

    /// Floors between `self` and `other`, ignoring direction.
    #[inline]
    pub fn distance(self, other: Floor) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── Building ──────────────────────────────────────────────────────────────────

/// Static building geometry.
///
/// The core consumes only the mailroom floor; `floor_count` exists for
/// construction-time bounds sanity (manifest validation, generators) and is
/// not enforced inside the robot or pool logic.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    /// Number of floors, ground floor included.
    pub floor_count: u32,
    /// Where robots load, unload their tubes, and wait for work.
    pub mailroom: Floor,
}

impl Building {
    pub fn new(floor_count: u32, mailroom: Floor) -> Self {
        Self { floor_count, mailroom }
    }

    /// `true` if `floor` exists in this building.
    #[inline]
    pub fn contains(&self, floor: Floor) -> bool {
        floor.0 < self.floor_count
    }

    /// The highest floor in the building.
    #[inline]
    pub fn top_floor(&self) -> Floor {
        Floor(self.floor_count.saturating_sub(1))
    }
}
