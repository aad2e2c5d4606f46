use thiserror::Error;

/// Error type shared by the store, document, export, and configuration layers.
#[derive(Debug, Error)]
pub enum NexusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Schema mismatch in {dataset}: expected columns [{expected}], found [{found}]")]
    Schema {
        dataset: &'static str,
        expected: String,
        found: String,
    },
    #[error("Invalid {dataset} record: {message}")]
    InvalidRecord {
        dataset: &'static str,
        message: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cannot compute {0}: division by zero")]
    DegenerateArithmetic(&'static str),
    #[error("{0} exceeds the largest supported amount")]
    AmountOverflow(&'static str),
    #[error("Document generation failed: {0}")]
    Document(String),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),
}

pub type Result<T> = std::result::Result<T, NexusError>;

impl From<serde_json::Error> for NexusError {
    fn from(err: serde_json::Error) -> Self {
        NexusError::Config(err.to_string())
    }
}

impl From<printpdf::Error> for NexusError {
    fn from(err: printpdf::Error) -> Self {
        NexusError::Document(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for NexusError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        NexusError::Spreadsheet(err.to_string())
    }
}

impl From<calamine::XlsxError> for NexusError {
    fn from(err: calamine::XlsxError) -> Self {
        NexusError::Spreadsheet(err.to_string())
    }
}
