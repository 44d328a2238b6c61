use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use ets_cli::pipeline::AnalysisRun;
use ets_common::any_to_string;
use ets_report::{AnalysisTables, ResultTable};
use polars::prelude::AnyValue;

pub fn print_run_summary(run: &AnalysisRun) {
    println!("Data file: {}", run.data_file.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Dyads"), Cell::new(run.rows)]);
    table.add_row(vec![
        Cell::new("Recode misses"),
        count_cell(run.recode.total_misses(), Color::Yellow),
    ]);
    for (column, misses) in &run.recode.misses {
        table.add_row(vec![
            Cell::new(format!("  -> {column}")).fg(Color::DarkGrey),
            count_cell(*misses, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("SWAN scores corrected"),
        count_cell(run.recode.corrected, Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Child race rule disagreements"),
        count_cell(run.derive.child_race_disagreements.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Substance flags all missing"),
        count_cell(run.derive.substance_all_missing, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Smoked throughout pregnancy"),
        match run.smoking_throughout_rate {
            Some(rate) => Cell::new(format!("{:.1}%", rate * 100.0)),
            None => dim_cell("-"),
        },
    ]);
    println!("{table}");
}

/// Print every table under its title. Floats are rounded to two decimals.
pub fn print_tables(tables: &AnalysisTables) {
    for table in tables.tables() {
        println!();
        println!("{} ({})", table.title(), table.name);
        println!("{}", render_table(table));
    }
}

fn render_table(result: &ResultTable) -> Table {
    let df = &result.data;
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, column) in df.get_columns().iter().enumerate() {
        if column.dtype().is_primitive_numeric() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    for row in 0..df.height() {
        let cells = df
            .get_columns()
            .iter()
            .map(|column| match column.get(row) {
                Ok(value) => value_cell(value),
                Err(_) => dim_cell("-"),
            })
            .collect::<Vec<_>>();
        table.add_row(cells);
    }
    table
}

fn value_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => dim_cell("-"),
        AnyValue::Float64(v) => Cell::new(format!("{v:.2}")),
        AnyValue::Float32(v) => Cell::new(format!("{v:.2}")),
        other => Cell::new(any_to_string(other)),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
