//! Domain logic for the record explorer.
//!
//! Everything here is pure: no I/O, no database handles. The `db` and `api`
//! crates build on these types to run the listing pipeline.

pub mod date_range;
pub mod error;
pub mod listing;
pub mod types;
