//! Customer reservations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Immutable booking record. Editing is done by replacing the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ReservationRecord")]
pub struct Reservation {
    customer_name: String,
    customer_phone: String,
    reservation_time: NaiveDateTime,
    table_number: u32,
}

#[derive(Deserialize)]
struct ReservationRecord {
    customer_name: String,
    #[serde(default)]
    customer_phone: String,
    reservation_time: NaiveDateTime,
    table_number: u32,
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = StoreError;

    fn try_from(record: ReservationRecord) -> Result<Self> {
        Reservation::new(
            record.customer_name,
            record.customer_phone,
            record.reservation_time,
            record.table_number,
        )
    }
}

impl Reservation {
    /// Build a reservation, rejecting a blank customer name.
    ///
    /// Name and phone are trimmed. The phone number is free text.
    pub fn new(
        customer_name: impl AsRef<str>,
        customer_phone: impl AsRef<str>,
        reservation_time: NaiveDateTime,
        table_number: u32,
    ) -> Result<Self> {
        let customer_name = customer_name.as_ref().trim();
        if customer_name.is_empty() {
            return Err(StoreError::invalid("customer name cannot be empty"));
        }

        Ok(Self {
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.as_ref().trim().to_string(),
            reservation_time,
            table_number,
        })
    }

    /// Customer the table is held for.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Contact number as entered.
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// Local wall-clock time of the booking.
    pub fn reservation_time(&self) -> NaiveDateTime {
        self.reservation_time
    }

    /// Table this reservation targets.
    pub fn table_number(&self) -> u32 {
        self.table_number
    }
}
