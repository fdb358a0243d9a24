#![warn(clippy::all, missing_docs)]

//! Core domain logic for the tablebook reservation tracker.
//!
//! This crate hosts the table and reservation models, the in-memory
//! reservation store, configuration handling, and the text helpers used by
//! the terminal front end and any future frontends.

pub mod config;
pub mod details;
pub mod error;
pub mod input;
pub mod models;
pub mod roster;
pub mod store;

pub use config::AppConfig;
pub use details::reservation_details;
pub use error::{ErrorKind, Result, StoreError};
pub use models::{Reservation, Table, TableCategory, TableSize};
pub use store::{ReservationStore, StoreLimits};
