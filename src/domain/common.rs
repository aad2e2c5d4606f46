//! Shared value helpers for the receipt and expense records.

use chrono::NaiveDate;

/// Whole currency units. The CFA franc has no minor unit.
pub type Amount = i64;

/// Storage date layout (`DD/MM/YYYY`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Parses a stored amount, accepting integral decimals such as `1500.0`.
pub fn parse_amount(raw: &str) -> Option<Amount> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<Amount>() {
        return Some(value);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as Amount)
    } else {
        None
    }
}

/// Serde adapter storing dates as `DD/MM/YYYY` text.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid date `{raw}`, expected DD/MM/YYYY")))
    }
}

/// Serde adapter for amounts written by spreadsheet tools as `100000.0`.
pub mod amount_format {
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::Amount;

    pub fn serialize<S>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(*amount)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Amount, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_amount(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid amount `{raw}`")))
    }
}

/// Declares a closed set of labelled choices stored by their label.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|item| item.label()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(input: &str) -> Result<Self, Self::Err> {
                let needle = input.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|item| item.label().to_lowercase() == needle)
                    .ok_or_else(|| {
                        format!(
                            "`{}` is not one of: {}",
                            input.trim(),
                            Self::labels().join(", ")
                        )
                    })
            }
        }
    };
}

pub(crate) use labelled_enum;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integral_decimal_amounts() {
        assert_eq!(parse_amount("1500"), Some(1500));
        assert_eq!(parse_amount(" 1500.0 "), Some(1500));
        assert_eq!(parse_amount("12.5"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn dates_use_day_month_year() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date(date), "07/03/2025");
        assert_eq!(parse_date("07/03/2025"), Some(date));
        assert_eq!(parse_date("2025-03-07"), None);
    }
}
