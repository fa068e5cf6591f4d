//! Pipeline configuration: TOML file plus command-line overrides.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gid_ingest::{
    DEFAULT_ENCODING_LABELS, DEFAULT_MISSING_VALUES, EncodingList, LoadOptions, MissingValues,
};
use gid_output::{DEFAULT_PREVIEW_ROWS, ExportOptions, ROW_CEILING};
use gid_transform::{MergeOptions, ReshapeOptions, YearMatching};
use serde::Deserialize;

/// Settings for one pipeline run.
///
/// Every field has a default, so an empty TOML file (or none at all) gives
/// the stock behavior: `data_main.csv` plus `data_country.csv` in, one
/// `global_indicator_output.xlsx` out.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Wide-format main dataset.
    pub main_input: PathBuf,
    /// Classification table keyed by entity code.
    pub classification_input: PathBuf,
    /// Workbook to write.
    pub output: PathBuf,
    /// Encoding labels tried in order.
    pub encodings: Vec<String>,
    /// Cell values read as missing.
    pub missing_values: Vec<String>,
    /// Also read spellings such as `NULL`, `nan` and `None` as missing.
    pub common_null_tokens: bool,
    /// Entity-code column of the classification table.
    pub classification_key: String,
    /// Category column copied from the classification table.
    pub category_column: String,
    pub year_matching: YearMatching,
    pub preview_rows: usize,
    /// Maximum data rows per sheet, capped at the spreadsheet limit.
    pub row_ceiling: usize,
    /// Load and merge the classification table.
    pub classification: bool,
    /// Stop after the preview without writing the workbook.
    pub dry_run: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let merge = MergeOptions::default();
        Self {
            main_input: PathBuf::from("data_main.csv"),
            classification_input: PathBuf::from("data_country.csv"),
            output: PathBuf::from("global_indicator_output.xlsx"),
            encodings: DEFAULT_ENCODING_LABELS.iter().map(|s| (*s).to_string()).collect(),
            missing_values: DEFAULT_MISSING_VALUES.iter().map(|s| (*s).to_string()).collect(),
            common_null_tokens: true,
            classification_key: merge.key_column,
            category_column: merge.category_column,
            year_matching: YearMatching::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            row_ceiling: ROW_CEILING,
            classification: true,
            dry_run: false,
        }
    }
}

impl PipelineConfig {
    /// Reads a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads `path` when given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves encoding labels and missing markers for the loader.
    pub fn load_options(&self) -> Result<LoadOptions> {
        let encodings = EncodingList::from_labels(&self.encodings)
            .context("invalid `encodings` setting")?;
        Ok(LoadOptions {
            encodings,
            missing: MissingValues::new(&self.missing_values)
                .with_common_nulls(self.common_null_tokens),
        })
    }

    pub fn reshape_options(&self) -> ReshapeOptions {
        ReshapeOptions {
            year_matching: self.year_matching,
            merge: self.classification.then(|| MergeOptions {
                key_column: self.classification_key.clone(),
                category_column: self.category_column.clone(),
            }),
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            row_ceiling: self.row_ceiling,
            preview_rows: self.preview_rows,
        }
    }
}
