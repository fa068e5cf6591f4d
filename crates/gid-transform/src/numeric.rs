//! Numeric coercion of observation values.

/// Parses a cell into a finite `f64`.
///
/// Surrounding whitespace is ignored. Anything that is not a plain decimal or
/// scientific number, including `NaN` and infinities, yields `None`.
pub fn parse_value(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_value("123"), Some(123.0));
        assert_eq!(parse_value("-0.5"), Some(-0.5));
        assert_eq!(parse_value("  42.25 "), Some(42.25));
        assert_eq!(parse_value("1.5e3"), Some(1500.0));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("1,234"), None);
        assert_eq!(parse_value(".."), None);
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("-infinity"), None);
    }
}
