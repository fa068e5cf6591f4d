use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use gid_cli::pipeline::{ColumnReport, PipelineOutcome};
use gid_output::INDICATOR_INFO_SHEET;
use gid_transform::ColumnRole;

pub fn print_summary(outcome: &PipelineOutcome) {
    println!("Input: {} ({})", outcome.main_input.display(), outcome.encoding);
    println!(
        "Records: {} from {} year columns{}",
        outcome.records,
        outcome.year_columns,
        if outcome.merged {
            ", classification merged"
        } else {
            ""
        }
    );
    let Some(export) = &outcome.export else {
        println!("Output: none (dry run)");
        return;
    };
    println!("Output: {}", export.path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Indicator"),
        header_cell("Part"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for sheet in &export.sheets {
        table.add_row(vec![
            Cell::new(&sheet.name),
            match &sheet.indicator {
                Some(code) => Cell::new(code),
                None => dim_cell("-"),
            },
            match sheet.part {
                Some(part) => Cell::new(part),
                None => dim_cell("-"),
            },
            Cell::new(sheet.rows),
        ]);
    }
    if let Some(rows) = export.indicator_info_rows {
        table.add_row(vec![
            Cell::new(INDICATOR_INFO_SHEET).fg(Color::Cyan),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new(rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} sheets", export.sheets.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(export.total_rows()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if export.unassigned_rows > 0 {
        println!(
            "{} rows without an indicator code were not written.",
            export.unassigned_rows
        );
    }
}

pub fn print_columns(report: &ColumnReport) {
    println!("File: {} ({})", report.path.display(), report.encoding);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Role"),
        header_cell("Year"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for column in &report.columns {
        table.add_row(vec![
            Cell::new(column.index),
            Cell::new(&column.name),
            role_cell(column.role),
            match column.year {
                Some(year) => Cell::new(year),
                None if column.role == ColumnRole::Year => Cell::new("none").fg(Color::Yellow),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
    if !report.missing.is_empty() {
        println!("Missing required columns: {}", report.missing.join(", "));
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn role_cell(role: ColumnRole) -> Cell {
    let cell = Cell::new(role.label());
    match role {
        ColumnRole::EntityCode | ColumnRole::IndicatorCode => {
            cell.fg(Color::Green).add_attribute(Attribute::Bold)
        }
        ColumnRole::IndicatorName => cell.fg(Color::Green),
        ColumnRole::Year => cell.fg(Color::Blue),
        ColumnRole::Identifier => cell,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
