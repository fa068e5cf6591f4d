//! Cell conversions for long-format frames.
//!
//! Preview rendering and spreadsheet writing read cells back through these
//! two helpers.

use polars::prelude::AnyValue;

/// Text shown for a cell. Nulls render empty.
///
/// ```
/// use polars::prelude::AnyValue;
/// use gid_common::cell_text;
///
/// assert_eq!(cell_text(AnyValue::Null), "");
/// assert_eq!(cell_text(AnyValue::Int32(1990)), "1990");
/// assert_eq!(cell_text(AnyValue::Float64(2.0)), "2");
/// assert_eq!(cell_text(AnyValue::String("ARG")), "ARG");
/// ```
pub fn cell_text(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_owned(),
        AnyValue::StringOwned(text) => text.to_string(),
        // f64's Display already drops a trailing ".0".
        AnyValue::Float32(v) => f64::from(v).to_string(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell, or `None` for nulls and non-numeric cells.
///
/// Strings are never parsed.
pub fn cell_number(value: AnyValue<'_>) -> Option<f64> {
    if value.dtype().is_primitive_numeric() {
        value.extract::<f64>()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_of_years_and_values() {
        assert_eq!(cell_text(AnyValue::Int32(2000)), "2000");
        assert_eq!(cell_text(AnyValue::Float64(40.5)), "40.5");
        assert_eq!(cell_text(AnyValue::Float64(1000.0)), "1000");
        assert_eq!(cell_text(AnyValue::Float64(-0.25)), "-0.25");
        assert_eq!(cell_text(AnyValue::String("NY.GDP.MKTP.CD")), "NY.GDP.MKTP.CD");
    }

    #[test]
    fn test_number_only_for_numeric_cells() {
        assert_eq!(cell_number(AnyValue::Null), None);
        assert_eq!(cell_number(AnyValue::Int32(1990)), Some(1990.0));
        assert_eq!(cell_number(AnyValue::Float64(3.25)), Some(3.25));
        assert_eq!(cell_number(AnyValue::String("2.5")), None);
    }
}
