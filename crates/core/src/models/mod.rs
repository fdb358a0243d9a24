//! Shared domain models.

pub mod reservation;
pub mod table;

pub use reservation::Reservation;
pub use table::{Table, TableCategory, TableSize};
