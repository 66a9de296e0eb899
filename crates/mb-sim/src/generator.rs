//! Deterministic random mail generation.
//!
//! A seeded [`SimRng`] drives every draw, so the same profile always yields
//! the same item sequence — whole runs stay reproducible end to end.

use std::ops::RangeInclusive;

use mb_core::{Building, Floor, MailId, MailItem, SimRng, Tick};

/// Shape of a generated mail batch.
#[derive(Clone, Debug)]
pub struct MailProfile {
    /// Items to generate.
    pub count: usize,
    /// Arrival ticks are drawn uniformly from `0..arrival_window`.
    pub arrival_window: u64,
    /// Weight draw, inclusive.  The default stays within the slot limit.
    pub weight_range: RangeInclusive<u32>,
    /// Probability that an item is fragile.
    pub fragile_probability: f64,
}

impl Default for MailProfile {
    fn default() -> Self {
        Self {
            count:               20,
            arrival_window:      50,
            weight_range:        200..=2000,
            fragile_probability: 0.15,
        }
    }
}

/// Seeded source of random mail.
///
/// `MailId`s count up from the id the generator was created with, so two
/// generators (or a generator after a manifest) can share a run without
/// colliding if the caller partitions the id space.
pub struct MailGenerator {
    rng:     SimRng,
    next_id: u32,
}

impl MailGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng:     SimRng::new(seed),
            next_id: 0,
        }
    }

    /// Generate `profile.count` items addressed to the given building,
    /// sorted by arrival tick.
    ///
    /// Destinations are uniform over every floor except the mailroom; the
    /// building must have at least two floors.
    pub fn generate(&mut self, profile: &MailProfile, building: &Building) -> Vec<MailItem> {
        let mut draws: Vec<(Tick, Floor, u32, bool)> = (0..profile.count)
            .map(|_| {
                let arrival = Tick(self.rng.gen_range(0..profile.arrival_window.max(1)));
                // Uniform over floors != mailroom, without resampling.
                let f = self.rng.gen_range(0..building.floor_count - 1);
                let destination = Floor(if f >= building.mailroom.0 { f + 1 } else { f });
                let weight = self.rng.gen_range(profile.weight_range.clone());
                let fragile = self.rng.gen_bool(profile.fragile_probability);
                (arrival, destination, weight, fragile)
            })
            .collect();
        draws.sort_by_key(|(arrival, ..)| *arrival);

        draws
            .into_iter()
            .map(|(arrival, destination, weight, fragile)| {
                let id = MailId(self.next_id);
                self.next_id += 1;
                MailItem::new(id, arrival, destination, weight, fragile)
            })
            .collect()
    }
}
