//! Disease metric enumeration keying the long table.

use std::fmt;
use std::str::FromStr;

use crate::columns;
use crate::error::SurvError;

/// A disease metric tracked in the long table.
///
/// The per-100k variants are distinct metrics with their own long-table
/// slices; they run through the same rolling/yoy machinery as the case
/// count metrics.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Disease {
    Measles,
    Rubella,
    MeaslesPer100k,
    RubellaPer100k,
}

impl Disease {
    /// All metrics, in wide-column order.
    pub const ALL: [Disease; 4] = [
        Disease::Measles,
        Disease::Rubella,
        Disease::MeaslesPer100k,
        Disease::RubellaPer100k,
    ];

    /// Display label used in the long table's `disease` column.
    pub fn label(self) -> &'static str {
        match self {
            Disease::Measles => "Measles",
            Disease::Rubella => "Rubella",
            Disease::MeaslesPer100k => "Measles_per100k",
            Disease::RubellaPer100k => "Rubella_per100k",
        }
    }

    /// The canonical wide-table column this metric is read from.
    pub fn measure_column(self) -> &'static str {
        match self {
            Disease::Measles => columns::MEASLES,
            Disease::Rubella => columns::RUBELLA,
            Disease::MeaslesPer100k => columns::MEASLES_PER100K,
            Disease::RubellaPer100k => columns::RUBELLA_PER100K,
        }
    }

    /// True for the per-100k rate variants.
    pub fn is_rate(self) -> bool {
        matches!(self, Disease::MeaslesPer100k | Disease::RubellaPer100k)
    }

    /// Look up a metric by its long-table label.
    pub fn from_label(label: &str) -> Option<Disease> {
        Disease::ALL.into_iter().find(|d| d.label() == label)
    }
}

impl fmt::Display for Disease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Disease {
    type Err = SurvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disease::from_label(s).ok_or_else(|| SurvError::InvalidParameter {
            name: "disease",
            reason: format!("unknown disease label '{s}'"),
        })
    }
}
