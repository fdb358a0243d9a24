//! Restaurant tables.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Seating area a table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableCategory {
    /// Upholstered booth.
    Booth,
    /// Next to a window.
    Window,
    /// Terrace or patio.
    Outdoor,
    /// Regular dining-room table.
    Standard,
}

impl TableCategory {
    /// All categories in display order.
    pub const ALL: [TableCategory; 4] = [
        TableCategory::Booth,
        TableCategory::Window,
        TableCategory::Outdoor,
        TableCategory::Standard,
    ];

    /// Upper-case label used in table summaries.
    pub fn label(self) -> &'static str {
        match self {
            TableCategory::Booth => "BOOTH",
            TableCategory::Window => "WINDOW",
            TableCategory::Outdoor => "OUTDOOR",
            TableCategory::Standard => "STANDARD",
        }
    }
}

impl fmt::Display for TableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TableCategory {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        TableCategory::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| StoreError::invalid(format!("unknown table category '{needle}'")))
    }
}

/// Physical table variant. Determines the default capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableSize {
    /// Always seats two.
    TwoSeater,
    /// Seats four unless built with an explicit capacity.
    FourSeater,
}

impl TableSize {
    /// Capacity used when no override is given.
    pub fn default_capacity(self) -> u32 {
        match self {
            TableSize::TwoSeater => 2,
            TableSize::FourSeater => 4,
        }
    }
}

/// A table on the restaurant roster.
///
/// Number, category, size and capacity are fixed at construction. Only the
/// reserved flag changes afterwards, and only through the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TableRecord")]
pub struct Table {
    number: u32,
    category: TableCategory,
    size: TableSize,
    capacity: u32,
    reserved: bool,
}

/// Wire shape of [`Table`]; converted through the same checks as the constructors.
#[derive(Deserialize)]
struct TableRecord {
    number: u32,
    category: TableCategory,
    size: TableSize,
    capacity: u32,
    #[serde(default)]
    reserved: bool,
}

impl TryFrom<TableRecord> for Table {
    type Error = StoreError;

    fn try_from(record: TableRecord) -> Result<Self> {
        let mut table = match record.size {
            TableSize::TwoSeater if record.capacity == 2 => {
                Table::two_seater(record.number, record.category)
            }
            TableSize::TwoSeater => {
                return Err(StoreError::invalid(format!(
                    "table {} is a two-seater but lists capacity {}",
                    record.number, record.capacity
                )))
            }
            TableSize::FourSeater => {
                Table::four_seater_with_capacity(record.number, record.category, record.capacity)?
            }
        };
        table.set_reserved(record.reserved);
        Ok(table)
    }
}

impl Table {
    /// Two-seat table.
    pub fn two_seater(number: u32, category: TableCategory) -> Self {
        Self::build(number, category, TableSize::TwoSeater, None)
    }

    /// Four-seat table with the default capacity.
    pub fn four_seater(number: u32, category: TableCategory) -> Self {
        Self::build(number, category, TableSize::FourSeater, None)
    }

    /// Four-seater variant seating `capacity` guests instead of four.
    pub fn four_seater_with_capacity(
        number: u32,
        category: TableCategory,
        capacity: u32,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(StoreError::invalid(format!(
                "table {number} capacity must be positive"
            )));
        }
        Ok(Self::build(
            number,
            category,
            TableSize::FourSeater,
            Some(capacity),
        ))
    }

    pub(crate) fn build(
        number: u32,
        category: TableCategory,
        size: TableSize,
        capacity: Option<u32>,
    ) -> Self {
        Self {
            number,
            category,
            size,
            capacity: capacity.unwrap_or_else(|| size.default_capacity()),
            reserved: false,
        }
    }

    /// Roster number, unique within a store.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Seating area.
    pub fn category(&self) -> TableCategory {
        self.category
    }

    /// Physical variant.
    pub fn size(&self) -> TableSize {
        self.size
    }

    /// Number of guests the table seats.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Whether an active reservation holds this table.
    pub fn is_reserved(&self) -> bool {
        self.reserved
    }

    /// `RESERVED` or `NOT RESERVED`.
    pub fn status_label(&self) -> &'static str {
        if self.reserved {
            "RESERVED"
        } else {
            "NOT RESERVED"
        }
    }

    pub(crate) fn set_reserved(&mut self, reserved: bool) {
        self.reserved = reserved;
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table {} ({}) - Capacity: {}, Status: {}",
            self.number,
            self.category,
            self.capacity,
            self.status_label()
        )
    }
}
