//! The `Sim` struct and its tick loop.

use std::collections::VecDeque;

use mb_core::{DeliverySink, MailItem, Tick};
use mb_pool::MailPool;
use mb_robot::{Robot, RobotState, TrafficBoard};

use crate::{SimConfig, SimObserver, SimResult};

/// The main simulation runner.
///
/// `Sim<D>` holds all simulation state and drives the three-phase tick loop:
///
/// 1. **Arrivals**: mail whose creation tick has come enters the pool.
/// 2. **Allocator pass**: the pool offers work to idle robots in
///    registration order and dispatches the ones that took a load.
/// 3. **Robot steps**: every robot's state machine advances once, in
///    ascending id order.
///
/// Robots registering idle during phase 3 are offered work in the *next*
/// tick's phase 2, never re-entrantly within the same tick.  With the fixed
/// phase and id ordering, a run is fully determined by its configuration and
/// arrival sequence.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: DeliverySink> {
    /// Global configuration (building, fleet modes, total ticks).
    pub config: SimConfig,

    /// The next tick to process.
    pub now: Tick,

    /// The fleet, indexed by `RobotId`.
    pub robots: Vec<Robot>,

    /// Shared movement facts + fragile-floor registry.
    pub board: TrafficBoard,

    /// The allocator.
    pub pool: MailPool,

    /// Where finished items go.
    pub sink: D,

    /// Future arrivals, ascending creation tick; drained from the front.
    pub(crate) arrivals: VecDeque<MailItem>,
}

impl<D: DeliverySink> Sim<D> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.now.0 < self.config.total_ticks {
            observer.on_tick_start(self.now);
            self.process_tick(self.now)?;
            observer.on_tick_end(self.now, &self.board, &self.robots);
            self.now = self.now.next();
        }
        observer.on_sim_end(self.now);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores
    /// `total_ticks`).  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            observer.on_tick_start(self.now);
            self.process_tick(self.now)?;
            observer.on_tick_end(self.now, &self.board, &self.robots);
            self.now = self.now.next();
        }
        Ok(())
    }

    /// Run until the system drains — no future arrivals, nothing pending,
    /// every robot empty and waiting — or until `max_ticks` more ticks have
    /// passed.  Returns the tick reached.
    pub fn run_until_idle<O: SimObserver>(
        &mut self,
        max_ticks: u64,
        observer:  &mut O,
    ) -> SimResult<Tick> {
        for _ in 0..max_ticks {
            if self.is_idle() {
                break;
            }
            self.run_ticks(1, observer)?;
        }
        Ok(self.now)
    }

    /// `true` when all mail has been handed to the sink and the whole fleet
    /// is parked at the mailroom.
    pub fn is_idle(&self) -> bool {
        self.arrivals.is_empty()
            && self.pool.pending_count() == 0
            && self
                .robots
                .iter()
                .all(|r| r.is_empty() && r.state() == RobotState::Waiting)
    }

    /// Items not yet handed to the sink (future arrivals + pool + in-flight).
    pub fn outstanding(&self) -> usize {
        let carried: usize = self
            .robots
            .iter()
            .map(|r| {
                [r.hand(), r.tube(), r.special()]
                    .iter()
                    .filter(|s| s.is_some())
                    .count()
            })
            .sum();
        self.arrivals.len() + self.pool.pending_count() + carried
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<()> {
        // ── Phase 1: mail arriving this tick enters the pool ──────────────
        while self.arrivals.front().is_some_and(|item| item.created() <= now) {
            if let Some(item) = self.arrivals.pop_front() {
                self.pool.submit(item);
            }
        }

        // ── Phase 2: allocator pass ───────────────────────────────────────
        self.pool.tick(now, &mut self.robots, &mut self.sink)?;

        // ── Phase 3: robot steps, ascending id ────────────────────────────
        for robot in &mut self.robots {
            robot.step(now, &mut self.board, &mut self.pool, &mut self.sink)?;
        }

        Ok(())
    }
}
