//! Parsing helpers for operator-entered text.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Result, StoreError};

/// Date format accepted from operators (`2030-05-17`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 24-hour time format accepted from operators (`19:30`).
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a positive table number.
pub fn parse_table_number(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(StoreError::invalid(format!(
            "'{trimmed}' is not a valid table number"
        ))),
    }
}

/// Combine `YYYY-MM-DD` and `HH:MM` into a local timestamp.
pub fn parse_reservation_time(date: &str, time: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|err| {
        StoreError::invalid(format!("invalid date '{}' ({err}), use YYYY-MM-DD", date.trim()))
    })?;
    let time = NaiveTime::parse_from_str(time.trim(), TIME_FORMAT).map_err(|err| {
        StoreError::invalid(format!("invalid time '{}' ({err}), use HH:MM", time.trim()))
    })?;
    Ok(date.and_time(time))
}

/// Render a timestamp the way [`parse_reservation_time`] reads it.
pub fn format_reservation_time(value: &NaiveDateTime) -> String {
    format!("{} {}", value.format(DATE_FORMAT), value.format(TIME_FORMAT))
}
