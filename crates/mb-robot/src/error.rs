use mb_core::{DeliveryError, ItemError, MailId, RobotId};
use thiserror::Error;

use crate::robot::Slot;

#[derive(Debug, Error)]
pub enum RobotError {
    /// The per-slot weight ceiling was exceeded.  The slot is left unchanged;
    /// the caller must not retry the same slot with the same item.
    #[error("mail {mail} at {weight_grams} g exceeds the per-slot weight limit")]
    ItemTooHeavy { mail: MailId, weight_grams: u32 },

    /// A fragile item was offered to the hand or tube.  Never reached when
    /// the allocator routes correctly.
    #[error("fragile mail {0} may only travel in the special slot")]
    FragileInCarrySlot(MailId),

    /// A slot mutator was called on an occupied slot.
    #[error("robot {robot}: {slot} slot is already occupied")]
    SlotOccupied { robot: RobotId, slot: Slot },

    /// A state handler found a slot empty that its state guarantees full.
    #[error("robot {robot}: {slot} slot is unexpectedly empty")]
    SlotEmpty { robot: RobotId, slot: Slot },

    /// The tube was loaded while the hand was empty — the hand is always
    /// loaded first.
    #[error("robot {0}: tube loaded while the hand is empty")]
    TubeWithoutHand(RobotId),

    /// The robot delivered more items since its last dispatch than its slots
    /// can carry.  This is a fatal diagnostic: the allocator over-loaded the
    /// robot, and the run should halt rather than absorb it.
    #[error("robot {robot} made {count} deliveries since its last dispatch")]
    ExcessiveDelivery { robot: RobotId, count: u32 },

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub type RobotResult<T> = Result<T, RobotError>;
