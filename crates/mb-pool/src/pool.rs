//! `MailPool` — the allocator that buffers pending mail and loads idle robots.
//!
//! # Ordering
//!
//! Pending items are kept sorted by destination floor **descending**.  The
//! hand is loaded before the tube and delivered before it, so putting the
//! farthest destination in the hand front-loads the longer trip.  This is the
//! simulated system's deliberate policy, not an optimization target:
//! correctness of the ordering contract matters, throughput does not, and a
//! full stable re-sort per insert is in-contract.
//!
//! Idle robots queue in FIFO registration order and are offered work in that
//! order, once per tick.

use std::collections::VecDeque;

use mb_core::{DeliverySink, MailItem, Mailroom, RobotId, Tick};
use mb_robot::Robot;

use crate::{PoolError, PoolResult};

/// The pending-mail buffer plus the idle-robot queue.
///
/// Robots are referenced by id only; the fleet slice is lent to
/// [`MailPool::tick`] for the duration of the loading pass, so no robot is
/// ever owned or aliased by the pool.
#[derive(Default)]
pub struct MailPool {
    /// Pending items, destination-descending (farthest first).
    pending: Vec<MailItem>,
    /// Robots awaiting a load, FIFO by registration.
    idle: VecDeque<RobotId>,
}

impl MailPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item and restore the descending destination order.
    ///
    /// The sort is stable, so items for the same floor keep submission order.
    pub fn submit(&mut self, item: MailItem) {
        self.pending.push(item);
        self.pending.sort_by(|a, b| b.destination().cmp(&a.destination()));
    }

    /// Pending items, farthest destination first.
    pub fn pending(&self) -> &[MailItem] {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// One allocator pass: offer work to every idle robot in registration
    /// order, then dispatch and dequeue the robots that took a load.
    ///
    /// Robots offered nothing stay queued and are retried next tick.
    pub fn tick<D: DeliverySink>(
        &mut self,
        now:    Tick,
        robots: &mut [Robot],
        sink:   &mut D,
    ) -> PoolResult<()> {
        let mut i = 0;
        while i < self.idle.len() {
            let id = self.idle[i];
            let robot = &mut robots[id.index()];
            if !robot.is_empty() {
                return Err(PoolError::IdleNotEmpty(id));
            }
            if robot.fragile_enabled() {
                self.load_fragile_aware(now, robot, sink)?;
            } else {
                self.load_basic(robot)?;
            }
            if robot.is_empty() {
                i += 1;
            } else {
                robot.dispatch();
                self.idle.remove(i);
            }
        }
        Ok(())
    }

    /// Two-slot loading for robots that never see fragile mail: farthest
    /// item into the hand, next-farthest into the tube.
    fn load_basic(&mut self, robot: &mut Robot) -> PoolResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        robot.load_hand(self.pending.remove(0))?;
        if !self.pending.is_empty() {
            robot.load_tube(self.pending.remove(0))?;
        }
        Ok(())
    }

    /// Fragile-aware loading: walk the pool farthest-to-nearest, routing
    /// fragile mail to the special slot (or rejecting it outright on a
    /// caution-disabled robot) and ordinary mail to hand then tube.
    ///
    /// The first item that fits no eligible empty slot ends the walk and
    /// keeps its pool position (requeue-and-stop).
    fn load_fragile_aware<D: DeliverySink>(
        &mut self,
        now:   Tick,
        robot: &mut Robot,
        sink:  &mut D,
    ) -> PoolResult<()> {
        while let Some(front) = self.pending.first() {
            if front.is_fragile() {
                if !robot.caution_enabled() {
                    // Refused before any slot assignment is attempted.
                    sink.reject(now, self.pending.remove(0))?;
                    continue;
                }
                if robot.special_empty() {
                    robot.load_special(self.pending.remove(0))?;
                    continue;
                }
            } else {
                if robot.hand_empty() {
                    robot.load_hand(self.pending.remove(0))?;
                    continue;
                }
                if robot.tube_empty() {
                    robot.load_tube(self.pending.remove(0))?;
                    continue;
                }
            }
            break;
        }
        Ok(())
    }
}

impl Mailroom for MailPool {
    fn put_back(&mut self, item: MailItem) {
        self.submit(item);
    }

    fn register_idle(&mut self, robot: RobotId) {
        debug_assert!(
            !self.idle.contains(&robot),
            "robot {robot} registered idle twice",
        );
        self.idle.push_back(robot);
    }
}
