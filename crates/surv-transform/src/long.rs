//! The disease-keyed long table.

use polars::prelude::{Column, DataFrame};

use surv_model::Disease;

use crate::error::TransformError;

/// One row per (country, disease, year).
///
/// `roll3`, `roll5`, and `yoy` are null until the enricher fills them in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LongRecord {
    pub region: String,
    pub country: String,
    pub year: Option<i64>,
    pub disease: Disease,
    pub value: Option<f64>,
    pub roll3: Option<f64>,
    pub roll5: Option<f64>,
    pub yoy: Option<f64>,
}

impl LongRecord {
    pub fn new(
        region: impl Into<String>,
        country: impl Into<String>,
        year: Option<i64>,
        disease: Disease,
        value: Option<f64>,
    ) -> Self {
        Self {
            region: region.into(),
            country: country.into(),
            year,
            disease,
            value,
            roll3: None,
            roll5: None,
            yoy: None,
        }
    }
}

/// The long table: records in (country, disease, year) sort order after
/// reshaping. Order is load-bearing for the enricher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    pub records: Vec<LongRecord>,
}

impl LongTable {
    pub fn new(records: Vec<LongRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct disease labels present, in [`Disease::ALL`] order.
    pub fn diseases(&self) -> Vec<Disease> {
        Disease::ALL
            .into_iter()
            .filter(|disease| self.records.iter().any(|r| r.disease == *disease))
            .collect()
    }

    /// Materialize as a DataFrame with columns
    /// region, country, year, disease, value, roll3, roll5, yoy.
    pub fn to_frame(&self) -> Result<DataFrame, TransformError> {
        let regions: Vec<&str> = self.records.iter().map(|r| r.region.as_str()).collect();
        let countries: Vec<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        let years: Vec<Option<i64>> = self.records.iter().map(|r| r.year).collect();
        let diseases: Vec<&str> = self.records.iter().map(|r| r.disease.label()).collect();
        let values: Vec<Option<f64>> = self.records.iter().map(|r| r.value).collect();
        let roll3: Vec<Option<f64>> = self.records.iter().map(|r| r.roll3).collect();
        let roll5: Vec<Option<f64>> = self.records.iter().map(|r| r.roll5).collect();
        let yoy: Vec<Option<f64>> = self.records.iter().map(|r| r.yoy).collect();

        let columns = vec![
            Column::new("region".into(), regions),
            Column::new("country".into(), countries),
            Column::new("year".into(), years),
            Column::new("disease".into(), diseases),
            Column::new("value".into(), values),
            Column::new("roll3".into(), roll3),
            Column::new("roll5".into(), roll5),
            Column::new("yoy".into(), yoy),
        ];
        Ok(DataFrame::new(columns)?)
    }
}
