//! In-memory table and reservation bookkeeping.

use std::collections::HashSet;

use chrono::{Local, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::{DEFAULT_MAX_RESERVATIONS, DEFAULT_MAX_TABLES},
    error::{Result, StoreError},
    models::{Reservation, Table},
    roster, AppConfig,
};

/// Fixed bounds applied by a [`ReservationStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLimits {
    /// Largest table number (and roster size) accepted.
    pub max_tables: usize,
    /// Maximum number of simultaneously active reservations.
    pub max_reservations: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_tables: DEFAULT_MAX_TABLES,
            max_reservations: DEFAULT_MAX_RESERVATIONS,
        }
    }
}

/// Authoritative state for the roster and the active reservations.
///
/// A table is flagged reserved exactly when one active reservation targets
/// it. Every query hands out an owned snapshot, never a view into the store.
#[derive(Debug, Clone)]
pub struct ReservationStore {
    tables: Vec<Table>,
    reservations: Vec<Reservation>,
    limits: StoreLimits,
}

impl Default for ReservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationStore {
    /// Store seeded with the default 20-table roster and default limits.
    pub fn new() -> Self {
        Self {
            tables: roster::default_roster(),
            reservations: Vec::new(),
            limits: StoreLimits::default(),
        }
    }

    /// Default roster with limits taken from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_roster(roster::default_roster(), config.limits())
    }

    /// Store over a caller-supplied roster.
    ///
    /// Table numbers must be unique and lie in `1..=max_tables`. Incoming
    /// reserved flags are cleared since no reservations exist yet.
    pub fn with_roster(tables: Vec<Table>, limits: StoreLimits) -> Result<Self> {
        if tables.len() > limits.max_tables {
            return Err(StoreError::invalid(format!(
                "roster has {} tables, limit is {}",
                tables.len(),
                limits.max_tables
            )));
        }

        let mut seen = HashSet::with_capacity(tables.len());
        for table in &tables {
            let number = table.number();
            if number == 0 || number as usize > limits.max_tables {
                return Err(StoreError::invalid(format!(
                    "table number {number} outside 1..={}",
                    limits.max_tables
                )));
            }
            if !seen.insert(number) {
                return Err(StoreError::invalid(format!(
                    "duplicate table number {number}"
                )));
            }
        }

        let tables = tables
            .into_iter()
            .map(|mut table| {
                table.set_reserved(false);
                table
            })
            .collect();

        Ok(Self {
            tables,
            reservations: Vec::new(),
            limits,
        })
    }

    /// Bounds this store was built with.
    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Book `reservation` on `table_number`.
    ///
    /// Fails with `NotFound`, `AlreadyReserved`, `CapacityExceeded`, or
    /// `InvalidInput` when the record targets a different table. State is
    /// untouched on failure.
    pub fn add_reservation(
        &mut self,
        table_number: u32,
        reservation: Reservation,
    ) -> Result<Reservation> {
        let limit = self.limits.max_reservations;
        let active = self.reservations.len();

        let table = self
            .table_mut(table_number)
            .ok_or(StoreError::NotFound {
                table: table_number,
            })?;
        if table.is_reserved() {
            warn!("rejected booking: table {table_number} already reserved");
            return Err(StoreError::AlreadyReserved {
                table: table_number,
            });
        }
        if active >= limit {
            warn!("rejected booking on table {table_number}: {active} of {limit} reservations in use");
            return Err(StoreError::CapacityExceeded { limit });
        }
        if reservation.table_number() != table_number {
            return Err(StoreError::invalid(format!(
                "reservation targets table {}, not table {table_number}",
                reservation.table_number()
            )));
        }

        table.set_reserved(true);
        self.reservations.push(reservation.clone());
        info!(
            "table {table_number} booked for {} at {}",
            reservation.customer_name(),
            reservation.reservation_time()
        );
        Ok(reservation)
    }

    /// Build and book a reservation at `when`, which must lie in the future.
    pub fn book(
        &mut self,
        table_number: u32,
        customer_name: &str,
        customer_phone: &str,
        when: NaiveDateTime,
    ) -> Result<Reservation> {
        let now = now();
        if when <= now {
            warn!("rejected booking on table {table_number}: {when} is not after {now}");
            return Err(StoreError::invalid(format!(
                "reservation time {when} must be in the future"
            )));
        }
        let reservation = Reservation::new(customer_name, customer_phone, when, table_number)?;
        self.add_reservation(table_number, reservation)
    }

    /// Book `minutes` from now.
    pub fn book_in_minutes(
        &mut self,
        table_number: u32,
        customer_name: &str,
        customer_phone: &str,
        minutes: i64,
    ) -> Result<Reservation> {
        if minutes <= 0 {
            return Err(StoreError::invalid(format!(
                "booking offset must be positive, got {minutes} minutes"
            )));
        }
        let offset = TimeDelta::try_minutes(minutes)
            .ok_or_else(|| StoreError::invalid(format!("booking offset {minutes} too large")))?;
        let when = now()
            .checked_add_signed(offset)
            .ok_or_else(|| StoreError::invalid(format!("booking offset {minutes} too large")))?;
        self.book(table_number, customer_name, customer_phone, when)
    }

    /// Drop the reservation on `table_number`, if any, and free the table.
    ///
    /// The reserved flag is cleared even when no reservation was found.
    pub fn remove_reservation(&mut self, table_number: u32) -> Option<Reservation> {
        let removed = self
            .reservations
            .iter()
            .position(|reservation| reservation.table_number() == table_number)
            .map(|index| self.reservations.remove(index));

        if let Some(table) = self.table_mut(table_number) {
            if removed.is_none() && table.is_reserved() {
                warn!("table {table_number} was flagged reserved without a reservation; clearing");
            }
            table.set_reserved(false);
        }

        match &removed {
            Some(reservation) => info!(
                "reservation for {} on table {table_number} removed",
                reservation.customer_name()
            ),
            None => debug!("no reservation on table {table_number} to remove"),
        }
        removed
    }

    /// Replace the reservation on `table_number` with new details.
    ///
    /// The original is restored if the replacement is rejected.
    pub fn reschedule(
        &mut self,
        table_number: u32,
        customer_name: &str,
        customer_phone: &str,
        when: NaiveDateTime,
    ) -> Result<Reservation> {
        let index = self
            .reservations
            .iter()
            .position(|reservation| reservation.table_number() == table_number)
            .ok_or_else(|| match self.table(table_number) {
                Some(_) => StoreError::NoReservation {
                    table: table_number,
                },
                None => StoreError::NotFound {
                    table: table_number,
                },
            })?;

        let original = self.reservations.remove(index);
        if let Some(table) = self.table_mut(table_number) {
            table.set_reserved(false);
        }

        match self.book(table_number, customer_name, customer_phone, when) {
            Ok(updated) => Ok(updated),
            Err(err) => {
                warn!("reschedule of table {table_number} failed, restoring: {err}");
                if let Some(table) = self.table_mut(table_number) {
                    table.set_reserved(true);
                }
                self.reservations.insert(index, original);
                Err(err)
            }
        }
    }

    /// Active reservation on `table_number`.
    pub fn reservation_for_table(&self, table_number: u32) -> Option<Reservation> {
        debug!("looking up reservation for table {table_number}");
        self.reservations
            .iter()
            .find(|reservation| reservation.table_number() == table_number)
            .cloned()
    }

    /// Snapshot of one table.
    pub fn table(&self, table_number: u32) -> Option<Table> {
        self.tables
            .iter()
            .find(|table| table.number() == table_number)
            .cloned()
    }

    /// Snapshot of the roster in roster order.
    pub fn tables(&self) -> Vec<Table> {
        self.tables.clone()
    }

    /// Snapshot of active reservations in booking order.
    pub fn reservations(&self) -> Vec<Reservation> {
        self.reservations.clone()
    }

    /// Roster-ordered snapshot of tables matching `filter`.
    pub fn filtered_tables<F>(&self, filter: F) -> Vec<Table>
    where
        F: Fn(&Table) -> bool,
    {
        self.tables
            .iter()
            .filter(|table| filter(table))
            .cloned()
            .collect()
    }

    /// Tables without an active reservation.
    pub fn available_tables(&self) -> Vec<Table> {
        self.filtered_tables(|table| !table.is_reserved())
    }

    fn table_mut(&mut self, table_number: u32) -> Option<&mut Table> {
        if table_number as usize > self.limits.max_tables {
            return None;
        }
        self.tables
            .iter_mut()
            .find(|table| table.number() == table_number)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
