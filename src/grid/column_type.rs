//! Column type estimation
//!
//! A column is classified by checking every non-empty value against each
//! category in precedence order. A single value that doesn't fit a category
//! rules that category out; there is no majority vote and no sample cap.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Semantic type of a column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Empty,
    Boolean,
    Date,
    Integer,
    Float,
    String,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Empty => "empty",
            ColumnType::Boolean => "boolean",
            ColumnType::Date => "date",
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Whether a value reads as a calendar date (or date-time)
pub fn is_date(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(value, fmt).is_ok())
        || DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(value, fmt).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
}

fn looks_decimal(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().any(|b| b.is_ascii_digit())
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Parse a plain decimal number (`12`, `-3.5`, `1e3`)
///
/// Words such as `inf` or `NaN` are not numbers here.
pub fn parse_decimal(value: &str) -> Option<f64> {
    let value = value.trim();
    if !looks_decimal(value) {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Parse a number, also accepting `0x`, `0o` and `0b` integer literals
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    let radix_body = |prefix_len: usize| &value[prefix_len..];

    let radix = match value.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    match radix {
        Some(radix) => u64::from_str_radix(radix_body(2), radix)
            .ok()
            .map(|n| n as f64),
        None => parse_decimal(value),
    }
}

fn is_boolean(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}

/// Estimate the type of a column from its cell values
///
/// Each value may hold a comma-separated list; every trimmed, non-empty item
/// counts individually.
pub fn estimate<S: AsRef<str>>(values: &[S]) -> ColumnType {
    let mut all_empty = true;
    let mut all_boolean = true;
    let mut all_date = true;
    let mut all_integer = true;
    let mut all_float = true;

    for value in values {
        for item in value.as_ref().split(',').map(str::trim) {
            if item.is_empty() {
                continue;
            }
            all_empty = false;

            if all_boolean && !is_boolean(item) {
                all_boolean = false;
            }
            if all_date && !is_date(item) {
                all_date = false;
            }
            if all_integer || all_float {
                match parse_number(item).filter(|n| n.is_finite()) {
                    Some(n) => {
                        if n.fract() != 0.0 {
                            all_integer = false;
                        }
                    }
                    None => {
                        all_integer = false;
                        all_float = false;
                    }
                }
            }
        }
    }

    if all_empty {
        ColumnType::Empty
    } else if all_boolean {
        ColumnType::Boolean
    } else if all_date {
        ColumnType::Date
    } else if all_integer {
        ColumnType::Integer
    } else if all_float {
        ColumnType::Float
    } else {
        ColumnType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_common_types() {
        assert_eq!(estimate(&["true", "FALSE"]), ColumnType::Boolean);
        assert_eq!(estimate(&["1", "2.5"]), ColumnType::Float);
        assert_eq!(estimate(&["", "", ""]), ColumnType::Empty);
        assert_eq!(estimate(&["2020-01-01", "1999-12-31"]), ColumnType::Date);
        assert_eq!(estimate(&["0x1", "0x2"]), ColumnType::Integer);
        assert_eq!(estimate(&["1.2e0", "3.4e0"]), ColumnType::Float);
        assert_eq!(estimate(&["hello", "1a"]), ColumnType::String);
    }

    #[test]
    fn test_estimate_no_values_is_empty() {
        let values: [&str; 0] = [];
        assert_eq!(estimate(&values), ColumnType::Empty);
    }

    #[test]
    fn test_estimate_all_must_match() {
        // A single outlier demotes the whole column.
        assert_eq!(estimate(&["1", "2", "3", "x"]), ColumnType::String);
        assert_eq!(estimate(&["true", "false", "maybe"]), ColumnType::String);
    }

    #[test]
    fn test_estimate_comma_separated_items() {
        assert_eq!(estimate(&["1, 2", "3,4"]), ColumnType::Integer);
        assert_eq!(estimate(&["true, false", ","]), ColumnType::Boolean);
        assert_eq!(estimate(&["1, b"]), ColumnType::String);
    }

    #[test]
    fn test_estimate_empty_items_ignored() {
        assert_eq!(estimate(&["", "7", ""]), ColumnType::Integer);
    }

    #[test]
    fn test_integral_floats_are_integers() {
        assert_eq!(estimate(&["1.0", "2e3"]), ColumnType::Integer);
    }

    #[test]
    fn test_non_finite_is_string() {
        assert_eq!(estimate(&["inf", "1"]), ColumnType::String);
        assert_eq!(estimate(&["NaN"]), ColumnType::String);
    }

    #[test]
    fn test_is_date() {
        assert!(is_date("2024-01-02"));
        assert!(is_date("2024/01/02"));
        assert!(is_date("12/31/1999"));
        assert!(is_date("2024-01-02T10:30:00"));
        assert!(is_date("2024-01-02T10:30:00Z"));
        assert!(!is_date("not-a-date"));
        assert!(!is_date("2024-13-45"));
        assert!(!is_date("42"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0x1f"), Some(31.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number(" -2.5 "), Some(-2.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("0xzz"), None);
        assert_eq!(parse_decimal("0x1"), None);
        assert_eq!(parse_decimal("."), None);
    }
}
