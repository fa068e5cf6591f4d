//! Year extraction from wide-table column names.

use std::sync::LazyLock;

use regex::Regex;

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("static regex"));

/// Extracts the first four consecutive ASCII digits in `name` as a year.
///
/// Handles bare years (`"1990"`) and World Bank style labels
/// (`"1990 [YR1990]"`). Returns `None` when the name holds no such run.
pub fn extract_year(name: &str) -> Option<i32> {
    FOUR_DIGITS
        .find(name)
        .and_then(|found| found.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_year() {
        assert_eq!(extract_year("1990"), Some(1990));
        assert_eq!(extract_year(" 2021 "), Some(2021));
    }

    #[test]
    fn test_bracketed_label() {
        assert_eq!(extract_year("1990 [YR1990]"), Some(1990));
        assert_eq!(extract_year("[YR2005]"), Some(2005));
    }

    #[test]
    fn test_first_run_wins() {
        assert_eq!(extract_year("19901"), Some(1990));
        assert_eq!(extract_year("FY2019-2020"), Some(2019));
    }

    #[test]
    fn test_no_year() {
        assert_eq!(extract_year("YR"), None);
        assert_eq!(extract_year("Unnamed: 19"), None);
        assert_eq!(extract_year("SE.PRM.ENRR.20"), None);
    }
}
