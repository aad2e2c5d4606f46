//! Line-oriented shell over the five views: dashboard, receipts, expenses,
//! catalog & follow-up, settings.

pub mod commands;
pub mod core;
pub mod io;
pub mod output;
pub mod registry;
pub mod table;
mod help;
mod shell;

pub use shell::{run_cli, SCRIPT_ENV};
