use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    amount_format, date_format, format_date, labelled_enum, Amount, Displayable,
};

labelled_enum! {
    /// Spending categories tracked against the operating budget.
    ExpenseCategory {
        Formalisation => "Formalisation",
        Equipment => "Matériel",
        Operations => "Fonctionnement",
        Marketing => "Marketing",
        StudyCosts => "Frais Études",
        Other => "Autre",
    }
}

/// Money spent by the cabinet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(rename = "Date", with = "date_format")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: ExpenseCategory,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Amount", with = "amount_format")]
    pub amount: Amount,
}

impl Expense {
    pub fn new(
        date: NaiveDate,
        category: ExpenseCategory,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            date,
            category,
            description: description.into(),
            amount,
        }
    }
}

impl Displayable for Expense {
    fn display_label(&self) -> String {
        if self.description.is_empty() {
            format!("{} · {}", format_date(self.date), self.category)
        } else {
            format!(
                "{} · {} · {}",
                format_date(self.date),
                self.category,
                self.description
            )
        }
    }
}
