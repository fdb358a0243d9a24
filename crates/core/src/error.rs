//! Error types returned by the reservation store.

use thiserror::Error;

/// Result alias used throughout the domain layer.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Recoverable failures signalled by store operations.
///
/// None of these leave the store in a partially updated state: a failed
/// operation has no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The table number is unknown or beyond the configured table bound.
    #[error("table {table} does not exist")]
    NotFound {
        /// Requested table number.
        table: u32,
    },
    /// The table exists but holds no active reservation.
    #[error("no active reservation found for table {table}")]
    NoReservation {
        /// Requested table number.
        table: u32,
    },
    /// The table already has an active reservation.
    #[error("table {table} is already reserved")]
    AlreadyReserved {
        /// Requested table number.
        table: u32,
    },
    /// The active reservation set is full.
    #[error("reservation limit of {limit} reached")]
    CapacityExceeded {
        /// Configured maximum number of active reservations.
        limit: usize,
    },
    /// Caller supplied a value that fails semantic validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse error category, handy for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum ErrorKind {
    NotFound,
    AlreadyReserved,
    CapacityExceeded,
    InvalidInput,
}

impl StoreError {
    /// Build an [`StoreError::InvalidInput`] from any message.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::NoReservation { .. } => ErrorKind::NotFound,
            Self::AlreadyReserved { .. } => ErrorKind::AlreadyReserved,
            Self::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}
