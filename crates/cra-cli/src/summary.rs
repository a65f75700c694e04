//! Human-readable result tables.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cra_model::{ErrorSeverity, PeriodMetrics, TransitionMatrix};

use cra_cli::logging::redact_value;

use crate::types::AnalysisResult;

pub fn print_summary(result: &AnalysisResult, daily: bool) {
    println!(
        "Records: {} read, {} normalized, {} accounting entries",
        result.raw_count, result.visit_count, result.accounting_count
    );
    match &result.period {
        Some(period) => {
            println!("Period: {} - {}", period.start, period.end);
            print_period_table(period);
            print_category_table(period);
            if daily {
                print_daily_table(period);
            }
        }
        None => println!("Period: no dated records, metrics skipped"),
    }
    if let Some(transitions) = &result.transitions {
        print_matrix("Cross-sell (first -> next visit)", &transitions.immediate_next);
        print_matrix("Cross-sell (first -> any later visit)", &transitions.any_later);
    }
    println!(
        "Calendar: {} day(s), {} holiday(s)",
        result.holidays.len(),
        result.holidays.holiday_count()
    );
    print_issue_table(result);
}

fn print_period_table(period: &PeriodMetrics) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Total revenue"), Cell::new(yen(period.total_revenue))]);
    table.add_row(vec![
        Cell::new("New patients"),
        Cell::new(period.new_patients.len()),
    ]);
    table.add_row(vec![
        Cell::new("Existing patients"),
        Cell::new(period.existing_patients.len()),
    ]);
    table.add_row(vec![
        Cell::new("Other visits"),
        Cell::new(period.other_patients.len()),
    ]);
    table.add_row(vec![
        Cell::new("Same-day new average"),
        Cell::new(yen(period.same_day_new_average)),
    ]);
    table.add_row(vec![
        Cell::new("New average (lifetime)"),
        Cell::new(yen(period.new_average)),
    ]);
    table.add_row(vec![
        Cell::new("Existing average (lifetime)"),
        Cell::new(yen(period.existing_average)),
    ]);
    println!("{table}");
}

fn print_category_table(period: &PeriodMetrics) {
    if period.category_totals.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Category"), header_cell("Revenue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (key, amount) in &period.category_totals {
        table.add_row(vec![Cell::new(key.to_string()), Cell::new(yen(*amount))]);
    }
    println!();
    println!("Category breakdown:");
    println!("{table}");
}

fn print_daily_table(period: &PeriodMetrics) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Date"),
        header_cell("Revenue"),
        header_cell("New"),
        header_cell("Existing"),
        header_cell("Other"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..5 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for day in &period.days {
        table.add_row(vec![
            Cell::new(day.date),
            Cell::new(yen(day.total_revenue)),
            Cell::new(day.new_patients.len()),
            Cell::new(day.existing_patients.len()),
            Cell::new(day.other_patients.len()),
        ]);
    }
    println!();
    println!("Daily metrics:");
    println!("{table}");
}

fn print_matrix(title: &str, matrix: &TransitionMatrix) {
    if matrix.is_empty() || matrix.total() == 0 {
        return;
    }
    let mut table = Table::new();
    let mut header = vec![header_cell("From \\ To")];
    for label in &matrix.labels {
        header.push(header_cell(label));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=matrix.labels.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (row_idx, from) in matrix.labels.iter().enumerate() {
        let mut row = vec![Cell::new(from).add_attribute(Attribute::Bold)];
        for count in &matrix.counts[row_idx] {
            row.push(count_cell(*count));
        }
        table.add_row(row);
    }
    println!();
    println!("{title}:");
    println!("{table}");
}

fn print_issue_table(result: &AnalysisResult) {
    if result.validation.issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Field"),
        header_cell("Patient"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    for issue in &result.validation.issues {
        let patient = issue
            .patient_id
            .as_deref()
            .map(redact_value)
            .unwrap_or("-");
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(&issue.code),
            Cell::new(issue.field.as_deref().unwrap_or("-")),
            Cell::new(patient),
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!(
        "Issues ({} error(s), {} warning(s)):",
        result.validation.error_count(),
        result.validation.warning_count()
    );
    println!("{table}");
}

/// Render an amount as yen with thousands separators.
fn yen(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative { "-" } else { "" };
    format!("{sign}¥{grouped}")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn severity_cell(severity: ErrorSeverity) -> Cell {
    match severity {
        ErrorSeverity::Error => Cell::new("ERROR").fg(Color::Red),
        ErrorSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
    }
}

fn count_cell(count: u64) -> Cell {
    if count == 0 {
        Cell::new("0").fg(Color::DarkGrey)
    } else {
        Cell::new(count)
    }
}

#[cfg(test)]
mod tests {
    use super::yen;

    #[test]
    fn yen_grouping() {
        assert_eq!(yen(0.0), "¥0");
        assert_eq!(yen(999.0), "¥999");
        assert_eq!(yen(33000.0), "¥33,000");
        assert_eq!(yen(1_234_567.0), "¥1,234,567");
        assert_eq!(yen(-5000.0), "-¥5,000");
    }
}
