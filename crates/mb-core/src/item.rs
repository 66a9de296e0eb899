//! `MailItem` — one piece of mail.
//!
//! Items are immutable after creation except for the `wrapped` flag, which
//! only fragile items may carry and which is toggled exclusively through
//! [`MailItem::wrap`] / [`MailItem::unwrap_wrapping`].  Misuse (wrapping a
//! non-fragile item, re-wrapping, unwrapping an unwrapped item) surfaces as
//! an [`ItemError`] rather than a debug-only assertion.
//!
//! Ownership mirrors the item's lifecycle: the pool owns pending items,
//! loading moves the item into exactly one robot slot, and delivery or
//! rejection moves it into the sink.  An item is never referenced from two
//! places at once.

use thiserror::Error;

use crate::{Floor, MailId, Tick};

/// Faults from the wrap/unwrap protocol.  All three indicate a state-machine
/// inconsistency in the caller, not a recoverable runtime condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("mail {0} is not fragile and cannot be wrapped")]
    NotFragile(MailId),

    #[error("mail {0} is already wrapped")]
    AlreadyWrapped(MailId),

    #[error("mail {0} is not wrapped")]
    NotWrapped(MailId),
}

/// One piece of mail.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailItem {
    id:           MailId,
    created:      Tick,
    destination:  Floor,
    weight_grams: u32,
    fragile:      bool,
    wrapped:      bool,
}

impl MailItem {
    /// Create a new item.  `wrapped` always starts false.
    pub fn new(id: MailId, created: Tick, destination: Floor, weight_grams: u32, fragile: bool) -> Self {
        Self {
            id,
            created,
            destination,
            weight_grams,
            fragile,
            wrapped: false,
        }
    }

    #[inline]
    pub fn id(&self) -> MailId {
        self.id
    }

    /// The tick the item entered the system.
    #[inline]
    pub fn created(&self) -> Tick {
        self.created
    }

    #[inline]
    pub fn destination(&self) -> Floor {
        self.destination
    }

    #[inline]
    pub fn weight_grams(&self) -> u32 {
        self.weight_grams
    }

    #[inline]
    pub fn is_fragile(&self) -> bool {
        self.fragile
    }

    /// `true` between wrap completion and unwrap at the destination.
    /// Always false for non-fragile items.
    #[inline]
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }

    /// Put protective wrapping on a fragile item.
    pub fn wrap(&mut self) -> Result<(), ItemError> {
        if !self.fragile {
            return Err(ItemError::NotFragile(self.id));
        }
        if self.wrapped {
            return Err(ItemError::AlreadyWrapped(self.id));
        }
        self.wrapped = true;
        Ok(())
    }

    /// Remove the wrapping before handing the item over.
    pub fn unwrap_wrapping(&mut self) -> Result<(), ItemError> {
        if !self.wrapped {
            return Err(ItemError::NotWrapped(self.id));
        }
        self.wrapped = false;
        Ok(())
    }
}

impl std::fmt::Display for MailItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} ({} g{})",
            self.id,
            self.destination,
            self.weight_grams,
            if self.fragile { ", fragile" } else { "" },
        )
    }
}
