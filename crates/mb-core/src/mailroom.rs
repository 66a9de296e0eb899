//! The robot→allocator boundary.

use crate::{MailItem, RobotId};

/// What a robot needs from the mailroom when it gets back.
///
/// Keeping this a trait lets the robot crate stay independent of the concrete
/// allocator: the pool implements it, tests substitute a recorder.
pub trait Mailroom {
    /// Return an undelivered item (a stranded tube load) to the pending pool.
    fn put_back(&mut self, item: MailItem);

    /// Announce that `robot` is back at the mailroom, empty-handed or not,
    /// and ready for a load on the allocator's next pass.
    ///
    /// # Precondition (enforced by caller)
    ///
    /// `robot` must not already be registered.  The state machine registers
    /// only on its single Returning→Waiting edge, so well-formed callers
    /// cannot violate this.
    fn register_idle(&mut self, robot: RobotId);
}
