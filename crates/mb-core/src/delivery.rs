//! The delivery boundary: where items leave the simulation.

use thiserror::Error;

use crate::{MailId, MailItem, Tick};

/// Faults raised by a sink that enforces the exactly-once contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("mail {0} has already been delivered")]
    AlreadyDelivered(MailId),

    #[error("mail {0} has already been rejected")]
    AlreadyRejected(MailId),
}

/// Accepts finished items.
///
/// `deliver` must be called exactly once per successfully completed item and
/// `reject` exactly once per refused item; an implementation may enforce this
/// by returning a [`DeliveryError`], which callers treat as fatal.  Items are
/// taken by value — ownership ends at the sink.
pub trait DeliverySink {
    /// An item arrived at its destination floor.
    fn deliver(&mut self, now: Tick, item: MailItem) -> Result<(), DeliveryError>;

    /// A fragile item was refused before any slot assignment (the offered
    /// robot runs with caution disabled).
    fn reject(&mut self, now: Tick, item: MailItem) -> Result<(), DeliveryError>;
}
