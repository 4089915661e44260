use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use cch_cli::dates::describe_range;
use cch_model::MetricRecord;

use crate::types::ReportOutcome;

pub fn print_summary(outcome: &ReportOutcome) {
    println!("Input: {}", outcome.input.display());
    match &outcome.output {
        Some(path) => println!("Report: {}", path.display()),
        None => println!("Report: not written (dry run)"),
    }
    println!("Period: {}", describe_range(&outcome.range));
    println!(
        "Tables: {}",
        outcome
            .tables
            .iter()
            .map(|t| format!("{} ({} rows)", t.name, t.rows))
            .collect::<Vec<_>>()
            .join(", ")
    );
    if !outcome.missing_tables.is_empty() {
        eprintln!(
            "Missing exports: {}",
            outcome
                .missing_tables
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!("{}", metrics_table(&outcome.records));
}

fn metrics_table(records: &[MetricRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Metric"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    for (index, record) in records.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&record.name),
            value_cell(record),
        ]);
    }
    table
}

fn value_cell(record: &MetricRecord) -> Cell {
    let text = if record.value.is_percent() {
        format!("{}%", record.value)
    } else {
        record.value.to_string()
    };
    if record.value.as_f64() == 0.0 {
        dim_cell(text)
    } else {
        Cell::new(text).add_attribute(Attribute::Bold)
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(4)),
            ColumnConstraint::UpperBoundary(Width::Percentage(85)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cch_model::MetricValue;

    #[test]
    fn one_row_per_record() {
        let records = vec![
            MetricRecord::new("Inbound", MetricValue::Count(4), "d"),
            MetricRecord::new("Enrolled share", MetricValue::Percent(62.5), "d"),
        ];
        let mut table = metrics_table(&records);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
    }

    #[test]
    fn percent_values_carry_a_sign() {
        let record = MetricRecord::new("Share", MetricValue::Percent(62.5), "d");
        assert_eq!(value_cell(&record).content(), "62.5%");
        let record = MetricRecord::new("Count", MetricValue::Count(0), "d");
        assert_eq!(value_cell(&record).content(), "0");
    }
}
