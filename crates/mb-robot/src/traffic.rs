//! `TrafficBoard` — shared per-robot movement facts and the fragile-floor
//! registry.
//!
//! # Why this exists
//!
//! Movement planning needs each robot to see every other robot's current
//! floor, destination, floor-priority flag, and fragile-floor reservation.
//! Holding those facts in one SoA board keyed by the dense `RobotId` gives
//! every robot read access to the whole fleet while each entry is written
//! only by its owning robot — no hidden globals, no aliased `&mut Robot`s.
//!
//! # Movement rule
//!
//! [`TrafficBoard::try_advance`] commits a one-floor step toward a target
//! unless one of two conditions suppresses it:
//!
//! 1. **Occupied floor** — another robot stands on the candidate floor and
//!    either that robot or the mover holds floor-priority for it as its
//!    destination.
//! 2. **Convergence** — another robot has reserved the candidate floor for a
//!    fragile drop-off and its unconstrained next step also lands there.
//!    Priority beats no priority; otherwise the lower id always moves and
//!    the higher id holds.  The id tie-break is what makes the symmetric
//!    head-on case deterministic.
//!
//! A suppressed robot keeps its floor for the tick and retries next tick.

use mb_core::{Floor, RobotId};

/// Fleet-wide movement facts, one entry per robot.
pub struct TrafficBoard {
    /// Current floor per robot.
    floors: Vec<Floor>,
    /// Destination floor per robot.  Meaningful while delivering; stale
    /// between trips, which is harmless because priority is off then.
    destinations: Vec<Floor>,
    /// Floor-priority flag, held from wrap completion to fragile hand-off.
    priority: Vec<bool>,
    /// The fragile-floor registry: the floor each robot has reserved for an
    /// in-flight fragile item, or `None` once delivered.
    reserved: Vec<Option<Floor>>,
}

impl TrafficBoard {
    /// All robots start at the mailroom with no reservations.
    pub fn new(robot_count: usize, mailroom: Floor) -> Self {
        Self {
            floors:       vec![mailroom; robot_count],
            destinations: vec![mailroom; robot_count],
            priority:     vec![false; robot_count],
            reserved:     vec![None; robot_count],
        }
    }

    pub fn robot_count(&self) -> usize {
        self.floors.len()
    }

    fn robot_ids(&self) -> impl Iterator<Item = RobotId> + '_ {
        (0..self.floors.len() as u32).map(RobotId)
    }

    // ── Per-robot accessors ───────────────────────────────────────────────

    #[inline]
    pub fn floor_of(&self, robot: RobotId) -> Floor {
        self.floors[robot.index()]
    }

    #[inline]
    pub fn destination_of(&self, robot: RobotId) -> Floor {
        self.destinations[robot.index()]
    }

    /// Teleport `robot` to `floor` without collision checks (initial
    /// placement and test setup).
    pub fn place(&mut self, robot: RobotId, floor: Floor) {
        self.floors[robot.index()] = floor;
    }

    pub fn set_destination(&mut self, robot: RobotId, floor: Floor) {
        self.destinations[robot.index()] = floor;
    }

    pub fn set_priority(&mut self, robot: RobotId, on: bool) {
        self.priority[robot.index()] = on;
    }

    /// `robot`'s registry entry, or `None` if it has nothing reserved.
    #[inline]
    pub fn reserved_floor(&self, robot: RobotId) -> Option<Floor> {
        self.reserved[robot.index()]
    }

    /// Record `floor` as reserved for `robot`'s in-flight fragile item.
    pub fn reserve(&mut self, robot: RobotId, floor: Floor) {
        self.reserved[robot.index()] = Some(floor);
    }

    /// Clear `robot`'s registry entry after the fragile hand-off.
    pub fn release(&mut self, robot: RobotId) {
        self.reserved[robot.index()] = None;
    }

    /// `true` if `robot` holds floor-priority for `floor`: the flag is set
    /// and `floor` is its current destination.
    pub fn has_floor_priority(&self, robot: RobotId, floor: Floor) -> bool {
        self.priority[robot.index()] && self.destinations[robot.index()] == floor
    }

    /// `robot`'s unconstrained next floor: one step toward its destination,
    /// its current floor when already there.  Used by other robots'
    /// convergence checks — collision suppression is deliberately ignored
    /// here (one-floor lookahead, nothing deeper).
    pub fn predicted_next(&self, robot: RobotId) -> Floor {
        self.floors[robot.index()].toward(self.destinations[robot.index()])
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move `robot` one floor toward `target`, unless a collision condition
    /// suppresses the step.  Returns whether the robot moved.
    ///
    /// Callers handle the already-there case; `try_advance` reports it as a
    /// suppressed step.
    pub fn try_advance(&mut self, robot: RobotId, target: Floor) -> bool {
        let here = self.floors[robot.index()];
        let candidate = here.toward(target);
        if candidate == here {
            return false;
        }
        if self.occupied_blocked(robot, candidate) || self.converge_blocked(robot, candidate) {
            return false;
        }
        self.floors[robot.index()] = candidate;
        true
    }

    /// Occupied-floor check: some other robot stands on `candidate`, and
    /// either that robot or `robot` holds floor-priority for it.
    fn occupied_blocked(&self, robot: RobotId, candidate: Floor) -> bool {
        for other in self.robot_ids() {
            if other == robot || self.floors[other.index()] != candidate {
                continue;
            }
            if self.has_floor_priority(other, candidate) || self.has_floor_priority(robot, candidate) {
                return true;
            }
        }
        false
    }

    /// Convergence check: another robot has reserved `candidate` and its
    /// predicted next floor is also `candidate`.
    fn converge_blocked(&self, robot: RobotId, candidate: Floor) -> bool {
        for other in self.robot_ids() {
            if other == robot || self.reserved[other.index()] != Some(candidate) {
                continue;
            }
            if self.predicted_next(other) != candidate {
                continue;
            }
            if self.has_floor_priority(other, candidate) && !self.has_floor_priority(robot, candidate) {
                return true;
            }
            if robot < other {
                // Lower id wins the symmetric case; keep scanning.
                continue;
            }
            return true;
        }
        false
    }
}
