//! Time-series enrichment: rolling means and year-over-year growth.

use tracing::debug;

use crate::long::LongTable;

/// Trailing mean over the last `window` rows ending at `end` (inclusive),
/// clipped at the group start. Nulls inside the window are skipped; the
/// result is null only when the window holds no non-null value.
fn trailing_mean(values: &[Option<f64>], end: usize, window: usize) -> Option<f64> {
    let start = end.saturating_sub(window - 1);
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values[start..=end].iter().flatten() {
        sum += value;
        count += 1;
    }
    if count == 0 { None } else { Some(sum / count as f64) }
}

/// Growth vs. the immediately preceding row in sorted order. Defined only
/// when both the current and previous values are non-null and the previous
/// value is non-zero; the first row of every group is always null.
fn year_over_year(previous: Option<f64>, current: Option<f64>) -> Option<f64> {
    let prev = previous?;
    let cur = current?;
    if prev == 0.0 { None } else { Some(cur / prev - 1.0) }
}

/// Enrich the sorted long table in place.
///
/// Rows are grouped by (country, disease); a group boundary resets every
/// window so no state leaks between groups. Within a group the rows are
/// consumed in their existing order; duplicate years are treated as
/// consecutive observations in stable input order, and year gaps do not
/// interpolate.
pub fn enrich_long(table: &mut LongTable) {
    let mut groups = 0usize;
    let mut start = 0usize;
    while start < table.records.len() {
        let mut end = start + 1;
        while end < table.records.len()
            && table.records[end].country == table.records[start].country
            && table.records[end].disease == table.records[start].disease
        {
            end += 1;
        }
        enrich_group(table, start, end);
        groups += 1;
        start = end;
    }
    debug!(rows = table.len(), groups, "enriched long table");
}

fn enrich_group(table: &mut LongTable, start: usize, end: usize) {
    let values: Vec<Option<f64>> = table.records[start..end].iter().map(|r| r.value).collect();
    for offset in 0..values.len() {
        let record = &mut table.records[start + offset];
        record.roll3 = trailing_mean(&values, offset, 3);
        record.roll5 = trailing_mean(&values, offset, 5);
        record.yoy = if offset == 0 {
            None
        } else {
            year_over_year(values[offset - 1], values[offset])
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_mean_clips_at_start() {
        let values = vec![Some(100.0), Some(150.0), Some(95.0)];
        assert_eq!(trailing_mean(&values, 0, 3), Some(100.0));
        assert_eq!(trailing_mean(&values, 1, 3), Some(125.0));
        assert_eq!(trailing_mean(&values, 2, 3), Some(115.0));
    }

    #[test]
    fn trailing_mean_skips_nulls() {
        let values = vec![Some(10.0), None, Some(20.0)];
        assert_eq!(trailing_mean(&values, 2, 3), Some(15.0));
        let all_null = vec![None, None];
        assert_eq!(trailing_mean(&all_null, 1, 3), None);
    }

    #[test]
    fn yoy_requires_nonzero_previous() {
        assert_eq!(year_over_year(Some(100.0), Some(150.0)), Some(0.5));
        assert_eq!(year_over_year(Some(0.0), Some(5.0)), None);
        assert_eq!(year_over_year(None, Some(5.0)), None);
        assert_eq!(year_over_year(Some(5.0), None), None);
    }
}
