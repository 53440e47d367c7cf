//! Console summary of an analysis run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

use surv_cli::types::AnalyzeResult;

pub fn print_summary(result: &AnalyzeResult) {
    println!("Source: {}", result.source.display());
    println!("Dataset: {}", result.dataset);
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);

    add_metric(&mut table, "Wide rows", result.wide_rows.to_string());
    add_metric(&mut table, "Long rows", result.long_rows.to_string());
    add_metric(&mut table, "Diseases", result.diseases.join(", "));
    add_metric(&mut table, "Countries", result.countries.to_string());
    add_metric(&mut table, "Countries scored", result.scored.to_string());
    add_metric(
        &mut table,
        "Countries skipped",
        result.skipped.len().to_string(),
    );
    add_metric(&mut table, "Flagged rows", result.flagged_rows.to_string());
    println!("{table}");

    for (label, path) in [
        ("Long table", &result.long_csv),
        ("Summary", &result.summary_report),
        ("Anomalies", &result.anomalies_csv),
    ] {
        if let Some(path) = path {
            println!("{label}: {}", path.display());
        }
    }

    if !result.skipped.is_empty() {
        println!(
            "Skipped for insufficient history: {}",
            result.skipped.join(", ")
        );
    }
    for error in &result.errors {
        eprintln!("error: {error}");
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn add_metric(table: &mut Table, name: &str, value: String) {
    table.add_row(vec![
        Cell::new(name),
        Cell::new(value).set_alignment(CellAlignment::Right),
    ]);
}
