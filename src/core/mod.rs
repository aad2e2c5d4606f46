pub mod record_manager;
pub mod services;
pub mod utils;

pub use record_manager::{RecordBackend, RecordManager};
