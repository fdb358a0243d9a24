//! The restaurant's standard table layout.

use crate::models::{Table, TableCategory, TableSize};

/// Number of tables in [`default_roster`].
pub const DEFAULT_ROSTER_SIZE: usize = 20;

/// Tables 1..=20 in floor order.
///
/// Windows seat two, booths and the main room seat four, the terrace seats
/// two. Table 19 (booth) and table 20 (standard) are enlarged four-seaters
/// seating six and eight.
pub fn default_roster() -> Vec<Table> {
    let mut tables = Vec::with_capacity(DEFAULT_ROSTER_SIZE);
    tables.extend((1..=4).map(|number| Table::two_seater(number, TableCategory::Window)));
    tables.extend((5..=8).map(|number| Table::four_seater(number, TableCategory::Booth)));
    tables.extend((9..=12).map(|number| Table::two_seater(number, TableCategory::Outdoor)));
    tables.extend((13..=18).map(|number| Table::four_seater(number, TableCategory::Standard)));
    tables.push(Table::build(19, TableCategory::Booth, TableSize::FourSeater, Some(6)));
    tables.push(Table::build(20, TableCategory::Standard, TableSize::FourSeater, Some(8)));
    tables
}
