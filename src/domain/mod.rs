//! Pure record types: receipts, expenses, the price list, and the cabinet profile.
//! No I/O here.

pub mod cabinet;
pub mod common;
pub mod expense;
pub mod receipt;

pub use cabinet::CabinetProfile;
pub use common::{Amount, Displayable};
pub use expense::{Expense, ExpenseCategory};
pub use receipt::{PaymentMethod, PriceList, Receipt, ServiceType};
