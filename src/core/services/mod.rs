pub mod expense_service;
pub mod followup_service;
pub mod receipt_service;
pub mod summary_service;

pub use expense_service::{ExpenseDraft, ExpenseService};
pub use followup_service::{FollowUpReminder, FollowUpService};
pub use receipt_service::{ReceiptDraft, ReceiptService};
pub use summary_service::{
    Breakdown, FinancialSummary, OutstandingBalance, SummaryService, BUDGET_TAG, PROGRESS_TAG,
};

use crate::errors::NexusError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] NexusError),
    #[error("{0}")]
    Invalid(String),
}
