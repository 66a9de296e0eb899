//! `mb-core` — foundational types for the mailbot fleet simulator.
//!
//! This crate is a dependency of every other `mb-*` crate.  It intentionally
//! has no `mb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                         |
//! |--------------|--------------------------------------------------|
//! | [`ids`]      | `RobotId`, `MailId`                              |
//! | [`floor`]    | `Floor`, `Building`                              |
//! | [`time`]     | `Tick`                                           |
//! | [`item`]     | `MailItem`, `ItemError`                          |
//! | [`delivery`] | `DeliverySink`, `DeliveryError`                  |
//! | [`mailroom`] | `Mailroom`                                       |
//! | [`rng`]      | `SimRng`                                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod delivery;
pub mod floor;
pub mod ids;
pub mod item;
pub mod mailroom;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use delivery::{DeliveryError, DeliverySink};
pub use floor::{Building, Floor};
pub use ids::{MailId, RobotId};
pub use item::{ItemError, MailItem};
pub use mailroom::Mailroom;
pub use rng::SimRng;
pub use time::Tick;
