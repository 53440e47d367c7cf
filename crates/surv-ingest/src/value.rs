//! Polars `AnyValue` conversion utilities.
//!
//! Frames built by this workspace only carry String, Int64, and Float64
//! columns, so the conversions cover those plus a generic fallback.

use polars::prelude::AnyValue;

/// Converts an `AnyValue` to its string form; null becomes the empty string.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to f64; null, non-numeric text, and unsupported
/// types become None.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Converts an `AnyValue` to i64; null, non-integer text, and unsupported
/// types become None.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int64(v) => Some(v),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Float64(v) => Some(v as i64),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Formats a float without trailing zeros ("125.0" renders as "125").
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numerics() {
        assert_eq!(parse_f64(" 12.5 "), Some(12.5));
        assert_eq!(parse_f64("N/A"), None);
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_i64("2020"), Some(2020));
        assert_eq!(parse_i64("2020.5"), None);
    }

    #[test]
    fn null_maps_to_empty_and_none() {
        assert_eq!(any_to_string(AnyValue::Null), "");
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_i64(AnyValue::Null), None);
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_numeric(125.0), "125");
        assert_eq!(format_numeric(0.5), "0.5");
        assert_eq!(format_numeric(-0.25), "-0.25");
    }
}
