//! Amount and percentage presentation.

use num_format::{Locale, ToFormattedString};

use crate::domain::Amount;

/// Formats an amount with thousands separators and the currency label,
/// e.g. `1,250,000 CFA`.
pub fn format_amount(amount: Amount, currency_label: &str) -> String {
    let digits = amount.to_formatted_string(&Locale::en);
    if currency_label.is_empty() {
        digits
    } else {
        format!("{digits} {currency_label}")
    }
}

/// One decimal place followed by `%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}
