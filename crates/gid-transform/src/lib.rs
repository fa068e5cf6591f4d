//! Wide-to-long reshaping of indicator tables.
//!
//! The reshape stage sits between ingestion and export:
//!
//! 1. classify the wide table's headers into key, identifier and year columns
//! 2. pivot year columns into (`Year`, `Value`) rows, dropping rows without a
//!    four-digit year or a finite numeric value
//! 3. left-join an optional classification column keyed by entity code
//! 4. collect distinct indicator code/name pairs
//!
//! Header rules are pluggable through [`ColumnClassifier`].

mod classify;
mod error;
mod merge;
mod metadata;
mod numeric;
mod pivot;
mod reshape;
mod year;

pub use classify::{
    ColumnClassifier, ColumnLayout, ColumnRole, ENTITY_CODE_NEEDLE, INDICATOR_CODE_NEEDLE,
    INDICATOR_NAME_NEEDLE, StrictYears, SubstringYears, YEAR_NEEDLES, YearMatching,
    classify_columns,
};
pub use error::{Result, TransformError};
pub use merge::{MergeOptions, Merged, merge_classification};
pub use metadata::indicator_info;
pub use numeric::parse_value;
pub use pivot::{PivotStats, Pivoted, VALUE_COLUMN, YEAR_COLUMN, pivot_long};
pub use reshape::{ReshapeOptions, Reshaped, reshape};
pub use year::extract_year;
