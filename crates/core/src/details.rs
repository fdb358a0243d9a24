//! Human-readable reservation summaries.

use std::fmt::Write;

use crate::{input::format_reservation_time, models::Reservation};

/// Multi-line summary of the requested `fields`, in request order.
///
/// Field names are matched case-insensitively: `name`, `phone` and `time`.
/// Anything else is echoed back as `[Unknown Field: ...]`.
pub fn reservation_details(reservation: &Reservation, fields: &[&str]) -> String {
    let mut details = String::from("Reservation Details:\n");
    for field in fields {
        // Writing into a String cannot fail.
        let _ = match field.trim().to_ascii_lowercase().as_str() {
            "name" => writeln!(details, "  Name: {}", reservation.customer_name()),
            "phone" => writeln!(details, "  Phone: {}", reservation.customer_phone()),
            "time" => writeln!(
                details,
                "  Time: {}",
                format_reservation_time(&reservation.reservation_time())
            ),
            _ => writeln!(details, "  [Unknown Field: {field}]"),
        };
    }
    details
}
