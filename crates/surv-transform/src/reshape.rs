//! Wide → long reshaping.

use std::cmp::Ordering;

use polars::prelude::{AnyValue, DataFrame};
use tracing::{debug, warn};

use surv_ingest::{any_to_f64, any_to_i64, any_to_string};
use surv_model::{Disease, columns};

use crate::long::{LongRecord, LongTable};

/// Disease metrics whose measure column is present in the wide table,
/// in [`Disease::ALL`] order.
pub fn present_diseases(wide: &DataFrame) -> Vec<Disease> {
    Disease::ALL
        .into_iter()
        .filter(|disease| wide.column(disease.measure_column()).is_ok())
        .collect()
}

/// Ascending year order with null years last, matching the reference sort.
pub(crate) fn cmp_year(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reshape the normalized wide table into the long table.
///
/// Every disease measure column present contributes one slice with all N
/// wide rows (nulls included), so the result has exactly N×D records. The
/// concatenated slices are stable-sorted by (country, disease label, year
/// ascending, null years last); duplicate keys keep their input order, and
/// the enricher depends on exactly this ordering.
///
/// A wide table without `country` or `year` columns cannot be keyed and
/// reshapes to an empty long table (fail soft, no error).
pub fn reshape_long(wide: &DataFrame) -> LongTable {
    let diseases = present_diseases(wide);
    let (Ok(country_col), Ok(year_col)) = (
        wide.column(columns::COUNTRY),
        wide.column(columns::YEAR),
    ) else {
        warn!("wide table lacks country/year identity columns; long table is empty");
        return LongTable::default();
    };

    let height = wide.height();
    let region_col = wide.column(columns::REGION).ok();

    let regions: Vec<String> = (0..height)
        .map(|idx| match region_col {
            Some(col) => any_to_string(col.get(idx).unwrap_or(AnyValue::Null)),
            None => String::new(),
        })
        .collect();
    let countries: Vec<String> = (0..height)
        .map(|idx| any_to_string(country_col.get(idx).unwrap_or(AnyValue::Null)))
        .collect();
    let years: Vec<Option<i64>> = (0..height)
        .map(|idx| any_to_i64(year_col.get(idx).unwrap_or(AnyValue::Null)))
        .collect();

    let mut records = Vec::with_capacity(height * diseases.len());
    for disease in &diseases {
        let Ok(measure) = wide.column(disease.measure_column()) else {
            continue;
        };
        for idx in 0..height {
            let value = any_to_f64(measure.get(idx).unwrap_or(AnyValue::Null));
            records.push(LongRecord::new(
                regions[idx].clone(),
                countries[idx].clone(),
                years[idx],
                *disease,
                value,
            ));
        }
    }

    records.sort_by(|a, b| {
        a.country
            .cmp(&b.country)
            .then_with(|| a.disease.label().cmp(b.disease.label()))
            .then_with(|| cmp_year(a.year, b.year))
    });

    debug!(
        wide_rows = height,
        diseases = diseases.len(),
        long_rows = records.len(),
        "reshaped wide table to long form"
    );
    LongTable::new(records)
}
