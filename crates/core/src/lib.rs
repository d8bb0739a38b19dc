//! Core types for Rollcall
//!
//! This crate defines the foundational types shared by every layer:
//! - [`IdCode`]: normalized participant key
//! - [`Activity`]: the trackable check-in kinds and their column names
//! - [`Table`] / [`Participant`]: the shared record table and a typed row view
//! - [`VersionToken`]: opaque revision marker of the remote blob
//! - [`Clock`]: event-local time source
//! - [`BlobBackend`]: transport seam for the versioned remote blob
//! - [`StoreError`]: failures of the record store

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod error;
pub mod table;
pub mod traits;
pub mod types;

pub use clock::{parse_utc_offset, Clock, FixedClock, SystemClock, TIMESTAMP_FORMAT};
pub use error::{StoreError, StoreResult};
pub use table::{
    ActivityState, AssignedDays, Participant, Table, TableError, ASSIGNED_DAY_COLUMN, DONE,
    ID_COLUMN, NAME_COLUMN,
};
pub use traits::{Blob, BlobBackend};
pub use types::{Activity, IdCode, ParseActivityError, VersionToken};
