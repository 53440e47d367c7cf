//! Plain-text summary report over the derived tables.
//!
//! A pure consumer of the pipeline outputs: descriptive statistics for the
//! wide table plus a preview of the long table, rendered as markdown-style
//! tables for easy embedding in notes or tickets.

use std::path::Path;

use comfy_table::Table;
use comfy_table::presets::ASCII_MARKDOWN;
use polars::prelude::{AnyValue, DataFrame, DataType};
use tracing::debug;

use surv_ingest::{any_to_f64, any_to_string, format_numeric};
use surv_transform::LongTable;

use crate::error::ReportError;

const PREVIEW_ROWS: usize = 20;

/// Round to four decimals and strip trailing zeros for stable display.
fn fmt_stat(value: f64) -> String {
    format_numeric((value * 10_000.0).round() / 10_000.0)
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt_stat).unwrap_or_default()
}

struct ColumnStats {
    name: String,
    count: usize,
    mean: Option<f64>,
    std: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

fn numeric_stats(frame: &DataFrame) -> Vec<ColumnStats> {
    let mut stats = Vec::new();
    for column in frame.get_columns() {
        if !matches!(column.dtype(), DataType::Float64 | DataType::Int64) {
            continue;
        }
        let values: Vec<f64> = (0..frame.height())
            .filter_map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        let count = values.len();
        let mean = if count > 0 {
            Some(values.iter().sum::<f64>() / count as f64)
        } else {
            None
        };
        let std = match (mean, count) {
            (Some(mean), n) if n > 1 => {
                let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                    / (n as f64 - 1.0);
                Some(var.sqrt())
            }
            _ => None,
        };
        let min = values.iter().copied().reduce(f64::min);
        let max = values.iter().copied().reduce(f64::max);
        stats.push(ColumnStats {
            name: column.name().to_string(),
            count,
            mean,
            std,
            min,
            max,
        });
    }
    stats
}

fn text_stats(frame: &DataFrame) -> Vec<(String, usize, usize)> {
    let mut stats = Vec::new();
    for column in frame.get_columns() {
        if matches!(column.dtype(), DataType::Float64 | DataType::Int64) {
            continue;
        }
        let values: Vec<String> = (0..frame.height())
            .map(|idx| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .filter(|value| !value.is_empty())
            .collect();
        let count = values.len();
        let unique = values
            .iter()
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        stats.push((column.name().to_string(), count, unique));
    }
    stats
}

/// Render the summary report as plain text.
pub fn render_summary(wide: &DataFrame, long: &LongTable) -> String {
    let mut out = String::new();
    out.push_str("Surveillance Data Summary\n");
    out.push_str("=========================\n\n");
    out.push_str(&format!(
        "Wide table: {} rows x {} columns\n",
        wide.height(),
        wide.width()
    ));
    out.push_str(&format!("Long table: {} rows\n\n", long.len()));

    let numeric = numeric_stats(wide);
    if !numeric.is_empty() {
        out.push_str("Numeric columns (wide table)\n\n");
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header(vec!["column", "count", "mean", "std", "min", "max"]);
        for stat in numeric {
            table.add_row(vec![
                stat.name,
                stat.count.to_string(),
                fmt_opt(stat.mean),
                fmt_opt(stat.std),
                fmt_opt(stat.min),
                fmt_opt(stat.max),
            ]);
        }
        out.push_str(&format!("{table}\n\n"));
    }

    let text = text_stats(wide);
    if !text.is_empty() {
        out.push_str("Text columns (wide table)\n\n");
        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_header(vec!["column", "count", "unique"]);
        for (name, count, unique) in text {
            table.add_row(vec![name, count.to_string(), unique.to_string()]);
        }
        out.push_str(&format!("{table}\n\n"));
    }

    out.push_str(&format!(
        "Long table preview (first {} rows)\n\n",
        PREVIEW_ROWS.min(long.len())
    ));
    let mut preview = Table::new();
    preview.load_preset(ASCII_MARKDOWN);
    preview.set_header(vec![
        "region", "country", "year", "disease", "value", "roll3", "roll5", "yoy",
    ]);
    for record in long.records.iter().take(PREVIEW_ROWS) {
        preview.add_row(vec![
            record.region.clone(),
            record.country.clone(),
            record.year.map(|y| y.to_string()).unwrap_or_default(),
            record.disease.label().to_string(),
            fmt_opt(record.value),
            fmt_opt(record.roll3),
            fmt_opt(record.roll5),
            fmt_opt(record.yoy),
        ]);
    }
    out.push_str(&format!("{preview}\n"));
    out
}

/// Write the summary report to `path`.
pub fn write_summary_report(
    path: &Path,
    wide: &DataFrame,
    long: &LongTable,
) -> Result<(), ReportError> {
    std::fs::write(path, render_summary(wide, long))?;
    debug!(path = %path.display(), "summary report written");
    Ok(())
}
