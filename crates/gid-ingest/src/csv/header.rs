//! CSV header normalization.

use std::collections::HashSet;

/// Normalizes a header value by trimming whitespace and a stray BOM.
fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Normalizes raw header cells into unique column names.
///
/// - surrounding whitespace is trimmed
/// - blank headers become `Unnamed: {index}`
/// - repeated names get a `.1`, `.2`, ... suffix in order of appearance
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());
    for (idx, value) in raw.iter().enumerate() {
        let mut name = normalize_header(value.as_ref());
        if name.is_empty() {
            name = format!("Unnamed: {idx}");
        }
        if seen.contains(&name) {
            let mut suffix = 1usize;
            let mut candidate = format!("{name}.{suffix}");
            while seen.contains(&candidate) {
                suffix += 1;
                candidate = format!("{name}.{suffix}");
            }
            name = candidate;
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_are_trimmed() {
        assert_eq!(
            normalize_headers(&["  Country Code ", "1990 "]),
            vec!["Country Code", "1990"]
        );
    }

    #[test]
    fn test_bom_is_removed() {
        assert_eq!(normalize_headers(&["\u{feff}Country Name"]), vec!["Country Name"]);
    }

    #[test]
    fn test_blank_headers_are_named_by_position() {
        assert_eq!(
            normalize_headers(&["Country Code", "", " "]),
            vec!["Country Code", "Unnamed: 1", "Unnamed: 2"]
        );
    }

    #[test]
    fn test_duplicates_are_suffixed() {
        assert_eq!(
            normalize_headers(&["A", "A", "A.1", "A"]),
            vec!["A", "A.1", "A.1.1", "A.2"]
        );
    }
}
