//! Sheet naming rules.
//!
//! Spreadsheet engines cap sheet names at 31 characters and reject a handful
//! of characters outright. Names are built from indicator codes by
//! truncation, then sanitized.

use std::collections::HashSet;

use crate::error::{ExportError, Result};

/// Longest sheet name a spreadsheet engine accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;
/// Characters kept from an indicator code for a single-sheet indicator.
pub const SINGLE_SHEET_CODE_LEN: usize = 28;
/// Characters kept from an indicator code for a split indicator.
pub const SPLIT_SHEET_CODE_LEN: usize = 20;

const ILLEGAL_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Name for an indicator whose rows fit on one sheet.
pub fn indicator_sheet_name(code: &str) -> String {
    truncate_chars(code, SINGLE_SHEET_CODE_LEN)
}

/// Name for part `part` (1-based) of an indicator split across sheets.
pub fn indicator_part_name(code: &str, part: usize) -> String {
    let name = format!("{}_p{part}", truncate_chars(code, SPLIT_SHEET_CODE_LEN));
    truncate_chars(&name, MAX_SHEET_NAME_LEN)
}

/// Name for chunk `part` (1-based) when there is no indicator column.
pub fn row_part_name(part: usize) -> String {
    truncate_chars(&format!("Part{part}"), MAX_SHEET_NAME_LEN)
}

/// Makes `name` acceptable to the spreadsheet engine.
///
/// Illegal characters become `_`, surrounding apostrophes are stripped, and
/// the result is capped at [`MAX_SHEET_NAME_LEN`]. An empty result falls back
/// to `Sheet{position}`.
pub fn sanitize_sheet_name(name: &str, position: usize) -> String {
    let replaced: String = name
        .chars()
        .map(|ch| if ILLEGAL_CHARS.contains(&ch) { '_' } else { ch })
        .collect();
    let trimmed = replaced.trim_matches('\'');
    if trimmed.is_empty() {
        return format!("Sheet{position}");
    }
    truncate_chars(trimmed, MAX_SHEET_NAME_LEN)
}

/// Fails on the first name that repeats (ignoring case) an earlier one.
pub fn ensure_unique<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.to_lowercase()) {
            return Err(ExportError::DuplicateSheetName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_names_are_truncated() {
        let code = "SE.PRM.TENR.FE.ADJUSTED.NET.ENROLMENT";
        assert_eq!(indicator_sheet_name(code), "SE.PRM.TENR.FE.ADJUSTED.NET.");
        assert_eq!(indicator_sheet_name("SP.POP.TOTL"), "SP.POP.TOTL");
        assert_eq!(indicator_part_name(code, 2), "SE.PRM.TENR.FE.ADJUS_p2");
    }

    #[test]
    fn test_row_part_name() {
        assert_eq!(row_part_name(1), "Part1");
        assert_eq!(row_part_name(12), "Part12");
    }

    #[test]
    fn test_sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize_sheet_name("GDP [US$]: a/b", 1), "GDP _US$__ a_b");
        assert_eq!(sanitize_sheet_name("'quoted'", 1), "quoted");
        assert_eq!(sanitize_sheet_name("''", 3), "Sheet3");
        assert_eq!(sanitize_sheet_name("", 4), "Sheet4");
    }

    #[test]
    fn test_ensure_unique_ignores_case() {
        assert!(ensure_unique(["SP.POP", "NY.GDP"]).is_ok());
        let err = ensure_unique(["SP.POP", "sp.pop"]).unwrap_err();
        assert!(matches!(err, ExportError::DuplicateSheetName { name } if name == "sp.pop"));
    }
}
