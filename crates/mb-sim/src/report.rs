//! `DeliveryReport` — a [`DeliverySink`] that keeps run statistics and
//! enforces the exactly-once contract.

use std::fmt;

use rustc_hash::FxHashSet;

use mb_core::{DeliveryError, DeliverySink, MailId, MailItem, Tick};

/// Accumulates delivery statistics for a run.
///
/// Every item id may be delivered once or rejected once, never both and
/// never twice; violations surface as [`DeliveryError`]s, which the tick
/// loop treats as fatal.
#[derive(Default)]
pub struct DeliveryReport {
    delivered_ids: FxHashSet<MailId>,
    rejected_ids:  FxHashSet<MailId>,

    delivered_normal:  u64,
    delivered_fragile: u64,
    weight_grams:      u64,
    latency_ticks:     u64,
}

impl DeliveryReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items delivered so far, fragile ones included.
    pub fn delivered_count(&self) -> u64 {
        self.delivered_normal + self.delivered_fragile
    }

    pub fn delivered_fragile_count(&self) -> u64 {
        self.delivered_fragile
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected_ids.len() as u64
    }

    /// Total weight delivered, in grams.
    pub fn total_weight_grams(&self) -> u64 {
        self.weight_grams
    }

    /// Sum over delivered items of (delivery tick - creation tick).
    pub fn total_latency_ticks(&self) -> u64 {
        self.latency_ticks
    }

    /// Mean ticks from creation to delivery, or 0.0 with no deliveries.
    pub fn mean_latency_ticks(&self) -> f64 {
        let delivered = self.delivered_count();
        if delivered == 0 {
            return 0.0;
        }
        self.latency_ticks as f64 / delivered as f64
    }

    fn check_unseen(&self, id: MailId) -> Result<(), DeliveryError> {
        if self.delivered_ids.contains(&id) {
            return Err(DeliveryError::AlreadyDelivered(id));
        }
        if self.rejected_ids.contains(&id) {
            return Err(DeliveryError::AlreadyRejected(id));
        }
        Ok(())
    }
}

impl DeliverySink for DeliveryReport {
    fn deliver(&mut self, now: Tick, item: MailItem) -> Result<(), DeliveryError> {
        self.check_unseen(item.id())?;
        self.delivered_ids.insert(item.id());
        if item.is_fragile() {
            self.delivered_fragile += 1;
        } else {
            self.delivered_normal += 1;
        }
        self.weight_grams += u64::from(item.weight_grams());
        self.latency_ticks += now.since(item.created());
        Ok(())
    }

    fn reject(&mut self, _now: Tick, item: MailItem) -> Result<(), DeliveryError> {
        self.check_unseen(item.id())?;
        self.rejected_ids.insert(item.id());
        Ok(())
    }
}

impl fmt::Display for DeliveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "delivered   : {} ({} normal, {} fragile)",
            self.delivered_count(),
            self.delivered_normal,
            self.delivered_fragile,
        )?;
        writeln!(f, "rejected    : {}", self.rejected_count())?;
        writeln!(f, "weight      : {} g", self.weight_grams)?;
        write!(f, "mean latency: {:.1} ticks", self.mean_latency_ticks())
    }
}
