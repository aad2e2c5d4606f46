use chrono::NaiveDate;

use crate::core::record_manager::RecordManager;
use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Amount, Displayable, Expense, ExpenseCategory};

/// Operator input of the expense form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: Amount,
}

pub struct ExpenseService;

impl ExpenseService {
    pub fn build(draft: ExpenseDraft, date: NaiveDate) -> ServiceResult<Expense> {
        if draft.amount < 0 {
            return Err(ServiceError::Invalid("Expense amount cannot be negative".into()));
        }
        Ok(Expense::new(
            date,
            draft.category,
            draft.description.trim(),
            draft.amount,
        ))
    }

    /// Appends the expense and refreshes the manager's tables.
    pub fn record(
        manager: &mut RecordManager,
        draft: ExpenseDraft,
        date: NaiveDate,
    ) -> ServiceResult<Expense> {
        let expense = Self::build(draft, date)?;
        manager.record_expense(expense.clone())?;
        tracing::info!(expense = %expense.display_label(), amount = expense.amount, "expense recorded");
        Ok(expense)
    }
}
