//! Console preview of the long table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use gid_common::cell_text;
use polars::prelude::DataFrame;

use crate::error::Result;

/// Rows shown by default.
pub const DEFAULT_PREVIEW_ROWS: usize = 15;

/// Renders the first `rows` rows of `frame` as a text table.
pub fn render_preview(frame: &DataFrame, rows: usize) -> Result<String> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(200);
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| Cell::new(name.as_str())),
    );

    let shown = rows.min(frame.height());
    for row_idx in 0..shown {
        let mut cells = Vec::with_capacity(frame.width());
        for column in frame.get_columns() {
            let value = column.get(row_idx)?;
            let cell = Cell::new(cell_text(value));
            cells.push(if column.dtype().is_primitive_numeric() {
                cell.set_alignment(CellAlignment::Right)
            } else {
                cell
            });
        }
        table.add_row(cells);
    }
    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom};

    #[test]
    fn test_preview_is_capped() {
        let codes: Vec<String> = (0..20).map(|i| format!("C{i:02}")).collect();
        let frame = DataFrame::new(vec![
            Column::new("Country Code".into(), codes),
            Column::new("Year".into(), vec![1990i32; 20]),
        ])
        .unwrap();

        let rendered = render_preview(&frame, DEFAULT_PREVIEW_ROWS).unwrap();

        assert!(rendered.contains("Country Code"));
        assert!(rendered.contains("C14"));
        assert!(!rendered.contains("C15"));
    }

    #[test]
    fn test_preview_of_short_frame() {
        let frame = DataFrame::new(vec![Column::new("Value".into(), vec![1.5f64])]).unwrap();
        let rendered = render_preview(&frame, DEFAULT_PREVIEW_ROWS).unwrap();
        assert!(rendered.contains("1.5"));
    }
}
