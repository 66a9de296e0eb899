//! `mb-sim` — tick driver for the mailbot fleet simulator.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Arrivals  — mail whose creation tick has come enters the pool.
//!   ② Allocator — the pool loads idle robots (registration order) and
//!                 dispatches the ones that took a load.
//!   ③ Steps     — every robot's state machine advances once, in
//!                 ascending id order.
//! ```
//!
//! Robots going idle in phase ③ become loadable in the *next* tick's
//! phase ② — never re-entrantly within the same tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mb_sim::{DeliveryReport, NoopObserver, SimBuilder, SimConfig, RobotMode};
//!
//! let config = SimConfig { building, fleet: vec![RobotMode::fragile_aware(); 3], total_ticks: 200 };
//! let mut sim = SimBuilder::new(config, DeliveryReport::new())
//!     .arrivals(mail)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{}", sim.sink);
//! ```

pub mod builder;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod observer;
pub mod report;
pub mod sim;


pub use builder::{RobotMode, SimBuilder, SimConfig};
pub use error::{SimError, SimResult};
pub use generator::{MailGenerator, MailProfile};
pub use manifest::{load_manifest_csv, load_manifest_reader, ManifestError};
pub use observer::{NoopObserver, SimObserver};
pub use report::DeliveryReport;
pub use sim::Sim;
