//! Flat-file persistence for the receipt and expense tables.

pub mod csv_backend;
pub mod spreadsheet;

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::utils::MAX_AMOUNT,
    domain::{
        common::{format_date, Amount},
        Expense, Receipt,
    },
    errors::{NexusError, Result},
};

pub use csv_backend::CsvRecordStore;

/// The two tables the application keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Receipts,
    Expenses,
}

impl DatasetKind {
    /// Canonical header row, in storage order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DatasetKind::Receipts => &["Date", "Name", "Service", "Total", "Paid", "Method"],
            DatasetKind::Expenses => &["Date", "Category", "Description", "Amount"],
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            DatasetKind::Receipts => "receipts.csv",
            DatasetKind::Expenses => "expenses.csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetKind::Receipts => "receipts",
            DatasetKind::Expenses => "expenses",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "receipts" | "receipt" => Some(DatasetKind::Receipts),
            "expenses" | "expense" => Some(DatasetKind::Expenses),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed cell value used when a row leaves the CSV world.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Amount),
}

/// A strongly-typed row of one dataset.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KIND: DatasetKind;

    /// Checks the required fields before the row is persisted.
    fn validate(&self) -> Result<()>;

    /// Cells in the order of [`DatasetKind::columns`].
    fn cells(&self) -> Vec<Cell>;
}

fn invalid(kind: DatasetKind, message: impl Into<String>) -> NexusError {
    NexusError::InvalidRecord {
        dataset: kind.label(),
        message: message.into(),
    }
}

impl Record for Receipt {
    const KIND: DatasetKind = DatasetKind::Receipts;

    fn validate(&self) -> Result<()> {
        if self.client.trim().is_empty() {
            return Err(invalid(Self::KIND, "client name is required"));
        }
        if self.total_due < 0 {
            return Err(invalid(Self::KIND, "total due cannot be negative"));
        }
        if self.paid < 0 {
            return Err(invalid(Self::KIND, "amount paid cannot be negative"));
        }
        if self.total_due > MAX_AMOUNT || self.paid > MAX_AMOUNT {
            return Err(invalid(Self::KIND, "amount exceeds the supported maximum"));
        }
        Ok(())
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(format_date(self.date)),
            Cell::Text(self.client.clone()),
            Cell::Text(self.service.label().to_string()),
            Cell::Number(self.total_due),
            Cell::Number(self.paid),
            Cell::Text(self.method.label().to_string()),
        ]
    }
}

impl Record for Expense {
    const KIND: DatasetKind = DatasetKind::Expenses;

    fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(invalid(Self::KIND, "amount cannot be negative"));
        }
        if self.amount > MAX_AMOUNT {
            return Err(invalid(Self::KIND, "amount exceeds the supported maximum"));
        }
        Ok(())
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(format_date(self.date)),
            Cell::Text(self.category.label().to_string()),
            Cell::Text(self.description.clone()),
            Cell::Number(self.amount),
        ]
    }
}
