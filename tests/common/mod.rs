#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use nexus_manager::{
    config::ConfigManager,
    core::RecordManager,
    domain::{Amount, Expense, ExpenseCategory, PaymentMethod, Receipt, ServiceType},
    storage::CsvRecordStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated record manager and config manager sharing one home.
pub fn setup_test_env() -> (RecordManager, ConfigManager) {
    let base = temp_base();
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    let store = CsvRecordStore::new(config_manager.data_dir()).expect("create csv store");
    let records = RecordManager::open(Box::new(store)).expect("open record manager");
    (records, config_manager)
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).expect("valid date")
}

pub fn receipt(client: &str, service: ServiceType, total: Amount, paid: Amount) -> Receipt {
    Receipt::new(day(1), client, service, total, paid, PaymentMethod::Cash)
}

pub fn expense(category: ExpenseCategory, description: &str, amount: Amount) -> Expense {
    Expense::new(day(2), category, description, amount)
}
