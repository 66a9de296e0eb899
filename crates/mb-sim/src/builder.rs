//! Simulation configuration and the validating builder.

use std::collections::VecDeque;

use mb_core::{Building, DeliverySink, MailItem, RobotId, Tick};
use mb_pool::MailPool;
use mb_robot::{Robot, TrafficBoard};

use crate::{Sim, SimError, SimResult};

// ── Config ────────────────────────────────────────────────────────────────────

/// Construction-time mode flags for one robot, fixed for its lifetime.
#[derive(Copy, Clone, Debug)]
pub struct RobotMode {
    /// May carry fragile mail in its special slot.
    pub caution_enabled: bool,
    /// Uses the fragile-aware loading policy.
    pub fragile_enabled: bool,
}

impl RobotMode {
    /// Two-slot loading, never offered fragile mail.
    pub fn basic() -> Self {
        Self { caution_enabled: false, fragile_enabled: false }
    }

    /// Fragile-aware loading with the special slot in use.
    pub fn fragile_aware() -> Self {
        Self { caution_enabled: true, fragile_enabled: true }
    }

    /// Fragile-aware loading but caution off: fragile mail offered to this
    /// robot is rejected to the sink.
    pub fn careless() -> Self {
        Self { caution_enabled: false, fragile_enabled: true }
    }
}

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Building geometry; robots start at `building.mailroom`.
    pub building: Building,

    /// One entry per robot.  The entry's position is the robot's dense id.
    pub fleet: Vec<RobotMode>,

    /// Ticks simulated by [`Sim::run`][crate::Sim::run].
    pub total_ticks: u64,
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`Sim<D>`].
///
/// # Example
///
/// ```rust,ignore
/// let config = SimConfig { building, fleet, total_ticks: 200 };
/// let mut sim = SimBuilder::new(config, DeliveryReport::new())
///     .arrivals(load_manifest_csv(path, &building)?)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D: DeliverySink> {
    config:   SimConfig,
    sink:     D,
    arrivals: Vec<MailItem>,
}

impl<D: DeliverySink> SimBuilder<D> {
    pub fn new(config: SimConfig, sink: D) -> Self {
        Self {
            config,
            sink,
            arrivals: Vec::new(),
        }
    }

    /// Supply the mail entering the system, scheduled by each item's
    /// creation tick.  Replaces any previously supplied batch.
    pub fn arrivals(mut self, mail: Vec<MailItem>) -> Self {
        self.arrivals = mail;
        self
    }

    /// Validate inputs, build the fleet and traffic board, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<D>> {
        let building = self.config.building;

        if self.config.fleet.is_empty() {
            return Err(SimError::Config("fleet is empty".into()));
        }
        if !building.contains(building.mailroom) {
            return Err(SimError::Config(format!(
                "mailroom {} is outside the {}-floor building",
                building.mailroom, building.floor_count,
            )));
        }
        for item in &self.arrivals {
            if !building.contains(item.destination()) {
                return Err(SimError::Config(format!(
                    "mail {} is addressed to {}, outside the {}-floor building",
                    item.id(),
                    item.destination(),
                    building.floor_count,
                )));
            }
        }

        let robots: Vec<Robot> = self
            .config
            .fleet
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                Robot::new(
                    RobotId(i as u32),
                    building.mailroom,
                    mode.caution_enabled,
                    mode.fragile_enabled,
                )
            })
            .collect();
        let board = TrafficBoard::new(robots.len(), building.mailroom);

        // Arrivals drain from the front in tick order.
        let mut arrivals = self.arrivals;
        arrivals.sort_by_key(MailItem::created);

        Ok(Sim {
            config:   self.config,
            now:      Tick::ZERO,
            robots,
            board,
            pool:     MailPool::new(),
            sink:     self.sink,
            arrivals: VecDeque::from(arrivals),
        })
    }
}
