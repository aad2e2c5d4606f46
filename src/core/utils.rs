use crate::{
    domain::Amount,
    errors::{NexusError, Result},
};

/// Largest amount a single row may carry (one trillion currency units).
pub const MAX_AMOUNT: Amount = 1_000_000_000_000;

/// `part / whole × 100`, refusing a zero denominator instead of yielding `inf`/`NaN`.
pub fn percent_of(part: Amount, whole: Amount, what: &'static str) -> Result<f64> {
    if whole == 0 {
        return Err(NexusError::DegenerateArithmetic(what));
    }
    Ok(part as f64 / whole as f64 * 100.0)
}

/// Adds `values`, failing with `AmountOverflow` instead of wrapping.
pub fn checked_total<I>(values: I, what: &'static str) -> Result<Amount>
where
    I: IntoIterator<Item = Amount>,
{
    values
        .into_iter()
        .try_fold(0, |total: Amount, value| total.checked_add(value))
        .ok_or(NexusError::AmountOverflow(what))
}

/// Parses an operator-typed amount. Accepts `100000`, `100 000` and `100,000`;
/// rejects negatives, fractions, anything above [`MAX_AMOUNT`] and anything non-numeric.
pub fn parse_amount_input(raw: &str) -> Result<Amount> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '\u{a0}' | '\u{202f}' | ','))
        .collect();
    if cleaned.is_empty() {
        return Err(NexusError::InvalidInput("an amount is required".into()));
    }
    let value: Amount = cleaned
        .parse()
        .map_err(|_| NexusError::InvalidInput(format!("`{}` is not a whole amount", raw.trim())))?;
    if value < 0 {
        return Err(NexusError::InvalidInput(
            "amounts cannot be negative".into(),
        ));
    }
    if value > MAX_AMOUNT {
        return Err(NexusError::InvalidInput(format!(
            "amounts cannot exceed {MAX_AMOUNT}"
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_zero_is_an_error() {
        let err = percent_of(10, 0, "progress").unwrap_err();
        assert!(matches!(err, NexusError::DegenerateArithmetic("progress")));
        assert_eq!(percent_of(250, 1000, "share").unwrap(), 25.0);
    }

    #[test]
    fn amount_input_accepts_grouping() {
        assert_eq!(parse_amount_input("100 000").unwrap(), 100_000);
        assert_eq!(parse_amount_input("1,250,000").unwrap(), 1_250_000);
        assert_eq!(parse_amount_input("0").unwrap(), 0);
        assert_eq!(parse_amount_input("1000000000000").unwrap(), MAX_AMOUNT);
    }

    #[test]
    fn amount_input_rejects_negative_and_garbage() {
        assert!(parse_amount_input("-5").is_err());
        assert!(parse_amount_input("12.5").is_err());
        assert!(parse_amount_input("abc").is_err());
        assert!(parse_amount_input("  ").is_err());
    }

    #[test]
    fn amount_input_rejects_values_above_cap() {
        assert!(parse_amount_input("1000000000001").is_err());
        assert!(parse_amount_input("9223372036854775807").is_err());
    }

    #[test]
    fn checked_total_reports_overflow() {
        assert_eq!(checked_total([1, 2, 3], "sum").unwrap(), 6);
        assert_eq!(checked_total(Vec::new(), "sum").unwrap(), 0);
        let err = checked_total([i64::MAX, 1], "collected").unwrap_err();
        assert!(matches!(err, NexusError::AmountOverflow("collected")));
    }
}
