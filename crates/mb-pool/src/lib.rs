//! `mb-pool` — the mail allocator for the mailbot fleet simulator.
//!
//! | Module   | Contents                        |
//! |----------|---------------------------------|
//! | [`pool`] | `MailPool`                      |
//! | [`error`]| `PoolError`, `PoolResult<T>`    |

pub mod error;
pub mod pool;


pub use error::{PoolError, PoolResult};
pub use pool::MailPool;
