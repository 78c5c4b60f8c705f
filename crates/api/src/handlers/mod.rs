//! Request handlers.
//!
//! Handlers delegate to the record store held in [`crate::state::AppState`]
//! and map errors via [`crate::error::AppError`].

pub mod records;
