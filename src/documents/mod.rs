//! Printable documents generated from stored records.

pub mod receipt_pdf;

pub use receipt_pdf::{
    receipt_file_name, render_receipt, ReceiptStatement, RenderOptions, PAID_SHARE_TAG,
};
