//! Missing-value markers recognized while parsing cells.

/// Tokens treated as missing by default.
pub const DEFAULT_MISSING_VALUES: &[&str] = &["..", "", "NA", "N/A", "#N/A"];

/// Null spellings common in exported CSV files, recognized on top of the
/// configured tokens unless disabled.
pub const COMMON_NULL_TOKENS: &[&str] = &[
    "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Set of literal tokens that denote an absent cell.
///
/// Whitespace-only cells are always missing, regardless of the configured set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValues {
    tokens: Vec<String>,
    common_nulls: bool,
}

impl MissingValues {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            common_nulls: true,
        }
    }

    /// Toggles recognition of [`COMMON_NULL_TOKENS`].
    #[must_use]
    pub fn with_common_nulls(mut self, enabled: bool) -> Self {
        self.common_nulls = enabled;
        self
    }

    /// Returns true if the raw cell text denotes a missing value.
    pub fn is_missing(&self, raw: &str) -> bool {
        raw.trim().is_empty()
            || self.tokens.iter().any(|token| token == raw)
            || (self.common_nulls && COMMON_NULL_TOKENS.contains(&raw))
    }

    /// Maps a raw cell to `None` when it is a missing marker.
    pub fn cell(&self, raw: &str) -> Option<String> {
        if self.is_missing(raw) {
            None
        } else {
            Some(raw.to_string())
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl Default for MissingValues {
    fn default() -> Self {
        Self::new(DEFAULT_MISSING_VALUES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers() {
        let missing = MissingValues::default();
        for raw in ["..", "", " ", "\t", "NA", "N/A", "#N/A"] {
            assert!(missing.is_missing(raw), "{raw:?} should be missing");
        }
        for raw in ["0", "na", "...", "12.5", "ARG"] {
            assert!(!missing.is_missing(raw), "{raw:?} should be present");
        }
    }

    #[test]
    fn test_cell_mapping() {
        let missing = MissingValues::default();
        assert_eq!(missing.cell(".."), None);
        assert_eq!(missing.cell("4.2"), Some("4.2".to_string()));
    }

    #[test]
    fn test_custom_markers() {
        let missing = MissingValues::new(["-", "n.a."]);
        assert!(missing.is_missing("-"));
        assert!(missing.is_missing("n.a."));
        assert!(missing.is_missing("   "));
        assert!(!missing.is_missing(".."));
    }

    #[test]
    fn test_common_null_spellings() {
        let missing = MissingValues::default();
        for raw in ["NULL", "null", "n/a", "nan", "NaN", "None", "<NA>"] {
            assert!(missing.is_missing(raw), "{raw:?} should be missing");
        }
        assert_eq!(missing.cell("None"), None);
    }

    #[test]
    fn test_common_nulls_can_be_disabled() {
        let missing = MissingValues::default().with_common_nulls(false);
        assert!(!missing.is_missing("NULL"));
        assert!(!missing.is_missing("nan"));
        assert!(missing.is_missing("#N/A"));
        assert!(missing.is_missing(" "));
    }
}
