//! Simulation observer trait for progress reporting and data collection.

use mb_core::Tick;
use mb_robot::{Robot, TrafficBoard};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  `on_tick_end` receives read-only views
/// of the whole fleet, which is how trajectory recorders and progress
/// printers observe a run without the sim knowing about them.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, _board: &TrafficBoard, robots: &[Robot]) {
///         if tick.0 % self.interval == 0 {
///             let loaded = robots.iter().filter(|r| !r.is_empty()).count();
///             println!("{tick}: {loaded} robots loaded");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after the allocator pass and every
    /// robot step.
    fn on_tick_end(&mut self, _tick: Tick, _board: &TrafficBoard, _robots: &[Robot]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
