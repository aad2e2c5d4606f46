use std::path::Path;

use crate::domain::{Expense, Receipt};
use crate::errors::NexusError;
use crate::storage::CsvRecordStore;

/// Trait that abstracts interaction with the persistence layer.
pub trait RecordBackend {
    fn load_receipts(&self) -> Result<Vec<Receipt>, NexusError>;
    fn load_expenses(&self) -> Result<Vec<Expense>, NexusError>;
    fn append_receipt(&self, receipt: Receipt) -> Result<usize, NexusError>;
    fn append_expense(&self, expense: Expense) -> Result<usize, NexusError>;
    fn location(&self) -> &Path;
}

impl RecordBackend for CsvRecordStore {
    fn load_receipts(&self) -> Result<Vec<Receipt>, NexusError> {
        self.load()
    }

    fn load_expenses(&self) -> Result<Vec<Expense>, NexusError> {
        self.load()
    }

    fn append_receipt(&self, receipt: Receipt) -> Result<usize, NexusError> {
        self.append(receipt)
    }

    fn append_expense(&self, expense: Expense) -> Result<usize, NexusError> {
        self.append(expense)
    }

    fn location(&self) -> &Path {
        self.data_dir()
    }
}

/// Facade holding the most recently loaded tables.
///
/// Every mutation is one append followed by a full reload of both tables, so
/// views always render what is on disk.
pub struct RecordManager {
    backend: Box<dyn RecordBackend>,
    receipts: Vec<Receipt>,
    expenses: Vec<Expense>,
}

impl RecordManager {
    pub fn open(backend: Box<dyn RecordBackend>) -> Result<Self, NexusError> {
        let mut manager = Self {
            backend,
            receipts: Vec::new(),
            expenses: Vec::new(),
        };
        manager.refresh()?;
        Ok(manager)
    }

    pub fn backend(&self) -> &dyn RecordBackend {
        self.backend.as_ref()
    }

    /// Re-reads both datasets from the backend.
    pub fn refresh(&mut self) -> Result<(), NexusError> {
        self.receipts = self.backend.load_receipts()?;
        self.expenses = self.backend.load_expenses()?;
        tracing::debug!(
            receipts = self.receipts.len(),
            expenses = self.expenses.len(),
            "tables refreshed"
        );
        Ok(())
    }

    pub fn record_receipt(&mut self, receipt: Receipt) -> Result<(), NexusError> {
        self.backend.append_receipt(receipt)?;
        self.refresh()
    }

    pub fn record_expense(&mut self, expense: Expense) -> Result<(), NexusError> {
        self.backend.append_expense(expense)?;
        self.refresh()
    }

    pub fn receipts(&self) -> &[Receipt] {
        &self.receipts
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
}
