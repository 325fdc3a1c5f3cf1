//! Hexdag aggregates fixed-width byte tuples into per-offset value
//! frequencies and adjacent-offset transition counts, then lays the result
//! out as a column-per-offset node graph suitable for visual auditing of
//! structured binary records.

#![warn(missing_docs)]

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod ingest;
pub mod layout;
pub mod logging;
pub mod render;
pub mod store;
pub mod view;

pub use error::{HexdagError, Result};
pub use store::{RecordStore, MAX_RECORD_SIZE};
