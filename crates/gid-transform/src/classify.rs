//! Column classification for wide tables.
//!
//! Headers of a wide table are sorted into key columns (entity code,
//! indicator code, optional indicator name), year/value columns, and plain
//! identifier columns. The rules live behind [`ColumnClassifier`] so other
//! header conventions can be supported without touching the pivot.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::{Result, TransformError};

/// Substring identifying the entity (country) code column.
pub const ENTITY_CODE_NEEDLE: &str = "Country Code";
/// Substring identifying the indicator code column.
pub const INDICATOR_CODE_NEEDLE: &str = "Indicator Code";
/// Substring identifying the indicator display-name column.
pub const INDICATOR_NAME_NEEDLE: &str = "Indicator Name";

/// Substrings that mark a column as a year column under substring matching.
pub const YEAR_NEEDLES: &[&str] = &["20", "19", "YR"];

static STRICT_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}(\s*\[YR[0-9]{4}\])?$").expect("static regex")
});

/// Role assigned to a column of the wide table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    EntityCode,
    IndicatorCode,
    IndicatorName,
    Year,
    Identifier,
}

impl ColumnRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::EntityCode => "entity code",
            Self::IndicatorCode => "indicator code",
            Self::IndicatorName => "indicator name",
            Self::Year => "year",
            Self::Identifier => "identifier",
        }
    }
}

/// Predicates over a column's position and (trimmed) name.
///
/// The first column satisfying each key predicate becomes that key.
pub trait ColumnClassifier {
    fn is_entity_code(&self, _index: usize, name: &str) -> bool {
        name.contains(ENTITY_CODE_NEEDLE)
    }

    fn is_indicator_code(&self, _index: usize, name: &str) -> bool {
        name.contains(INDICATOR_CODE_NEEDLE)
    }

    fn is_indicator_name(&self, _index: usize, name: &str) -> bool {
        name.contains(INDICATOR_NAME_NEEDLE)
    }

    fn is_year(&self, index: usize, name: &str) -> bool;
}

/// Year columns are those whose name contains "20", "19" or "YR".
///
/// This also catches names that hold no real year; such columns are dropped
/// later when no four-digit year can be extracted.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringYears;

impl ColumnClassifier for SubstringYears {
    fn is_year(&self, _index: usize, name: &str) -> bool {
        YEAR_NEEDLES.iter().any(|needle| name.contains(needle))
    }
}

/// Year columns are bare four-digit years or `YYYY [YRYYYY]` labels.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictYears;

impl ColumnClassifier for StrictYears {
    fn is_year(&self, _index: usize, name: &str) -> bool {
        STRICT_YEAR.is_match(name)
    }
}

/// Configured year-column matching rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearMatching {
    #[default]
    Substring,
    Strict,
}

impl YearMatching {
    pub fn classifier(self) -> &'static dyn ColumnClassifier {
        match self {
            Self::Substring => &SubstringYears,
            Self::Strict => &StrictYears,
        }
    }
}

/// Positions of every column role in a wide table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub entity_code: usize,
    pub indicator_code: usize,
    pub indicator_name: Option<usize>,
    /// Non-year columns in table order, keys included.
    pub identifiers: Vec<usize>,
    /// Year/value columns in table order.
    pub years: Vec<usize>,
}

impl ColumnLayout {
    /// Role of the column at `index`.
    pub fn role(&self, index: usize) -> ColumnRole {
        if index == self.entity_code {
            ColumnRole::EntityCode
        } else if index == self.indicator_code {
            ColumnRole::IndicatorCode
        } else if self.indicator_name == Some(index) {
            ColumnRole::IndicatorName
        } else if self.years.contains(&index) {
            ColumnRole::Year
        } else {
            ColumnRole::Identifier
        }
    }
}

/// Classifies `headers` into a [`ColumnLayout`].
///
/// Fails with [`TransformError::MissingColumns`] when the entity code or the
/// indicator code column cannot be found. Key columns are never treated as
/// year columns.
pub fn classify_columns(headers: &[String], classifier: &dyn ColumnClassifier) -> Result<ColumnLayout> {
    let find = |predicate: &dyn Fn(usize, &str) -> bool| {
        headers
            .iter()
            .enumerate()
            .find(|(idx, name)| predicate(*idx, name.trim()))
            .map(|(idx, _)| idx)
    };
    let entity_code = find(&|idx: usize, name: &str| classifier.is_entity_code(idx, name));
    let indicator_code = find(&|idx: usize, name: &str| {
        classifier.is_indicator_code(idx, name)
    });
    let indicator_name = find(&|idx: usize, name: &str| {
        classifier.is_indicator_name(idx, name)
    });

    let (entity_code, indicator_code) = match (entity_code, indicator_code) {
        (Some(entity), Some(indicator)) => (entity, indicator),
        (entity, indicator) => {
            let mut missing = Vec::new();
            if entity.is_none() {
                missing.push(ENTITY_CODE_NEEDLE.to_string());
            }
            if indicator.is_none() {
                missing.push(INDICATOR_CODE_NEEDLE.to_string());
            }
            return Err(TransformError::MissingColumns { missing });
        }
    };

    let mut identifiers = Vec::new();
    let mut years = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        let is_key = idx == entity_code || idx == indicator_code || indicator_name == Some(idx);
        if !is_key && classifier.is_year(idx, name.trim()) {
            years.push(idx);
        } else {
            identifiers.push(idx);
        }
    }

    Ok(ColumnLayout {
        entity_code,
        indicator_code,
        indicator_name,
        identifiers,
        years,
    })
}
