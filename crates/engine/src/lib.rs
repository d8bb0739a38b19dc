//! Check-in engine for Rollcall
//!
//! Given a participant ID and an activity, the engine looks the participant
//! up in a freshly loaded table, decides whether the action is allowed today,
//! and if so records it through the record store.
//!
//! ## Architecture
//!
//! ```text
//! process(id, activity)
//!   -> TableStore::load_fresh   (lookup)
//!   -> validate                 (assigned day, already done)
//!   -> TableStore::update       (re-validate on fresh content, stamp, write)
//! ```
//!
//! The engine holds no locks and never retries; concurrent writers are
//! reconciled by the store's optimistic concurrency.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod outcome;
pub mod validation;

pub use engine::{CheckinEngine, Summary};
pub use outcome::Outcome;
pub use validation::{validate, BlockReason, Verdict};
