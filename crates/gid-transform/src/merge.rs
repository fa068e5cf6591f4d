//! Left join of classification labels onto the long table.

use std::collections::HashMap;

use gid_ingest::CsvTable;
use polars::prelude::{DataFrame, NamedFrom, Series};
use serde::Deserialize;

use crate::error::{Result, TransformError};

/// Which classification columns to join, and under which name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Entity-code column in the classification table.
    pub key_column: String,
    /// Category column copied onto the long table.
    pub category_column: String,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            key_column: "Country Code".to_string(),
            category_column: "Income Group".to_string(),
        }
    }
}

/// Result of [`merge_classification`].
#[derive(Debug, Clone)]
pub struct Merged {
    pub frame: DataFrame,
    /// Long rows whose entity code was present in the classification table.
    pub matched_rows: usize,
}

/// Adds the category column to `long`, keyed on `entity_column`.
///
/// The classification key column is matched against the long table's entity
/// column regardless of their names. Unmatched rows keep a null category and
/// are never dropped. When an entity code appears more than once in the
/// classification table, its first row wins. A long table that already has a
/// column named like the category is left untouched and reported as a merge
/// error.
pub fn merge_classification(
    long: &DataFrame,
    entity_column: &str,
    classification: &CsvTable,
    options: &MergeOptions,
) -> Result<Merged> {
    let key_idx = classification
        .column_index(options.key_column.trim())
        .ok_or_else(|| TransformError::Merge {
            reason: format!("column '{}' not found", options.key_column),
        })?;
    let category_idx = classification
        .column_index(options.category_column.trim())
        .ok_or_else(|| TransformError::Merge {
            reason: format!("column '{}' not found", options.category_column),
        })?;

    let category = options.category_column.trim();
    if long.column(category).is_ok() {
        return Err(TransformError::Merge {
            reason: format!("long table already has a '{category}' column"),
        });
    }

    let mut lookup: HashMap<&str, Option<&str>> = HashMap::with_capacity(classification.len());
    for row in &classification.rows {
        let Some(code) = row.get(key_idx).and_then(|cell| cell.as_deref()) else {
            continue;
        };
        let category = row.get(category_idx).and_then(|cell| cell.as_deref());
        lookup.entry(code).or_insert(category);
    }

    let codes = long.column(entity_column)?.str()?;
    let mut matched_rows = 0usize;
    let categories: Vec<Option<&str>> = codes
        .iter()
        .map(|code| match code.and_then(|code| lookup.get(code)) {
            Some(category) => {
                matched_rows += 1;
                *category
            }
            None => None,
        })
        .collect();

    let mut frame = long.clone();
    frame.with_column(Series::new(category.into(), categories))?;
    Ok(Merged {
        frame,
        matched_rows,
    })
}
