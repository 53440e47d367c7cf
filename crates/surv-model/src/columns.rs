//! Canonical wide-table column names and the fixed source rename map.

pub const REGION: &str = "region";
pub const COUNTRY: &str = "country";
pub const YEAR: &str = "year";
pub const MEASLES: &str = "measles";
pub const RUBELLA: &str = "rubella";
pub const POPULATION: &str = "population";
pub const MEASLES_PER100K: &str = "measles_per100k";
pub const RUBELLA_PER100K: &str = "rubella_per100k";

/// Fixed, total rename map from expected source headers to canonical names.
/// Headers not listed here pass through normalization unchanged.
pub const SOURCE_RENAMES: [(&str, &str); 8] = [
    ("Region", REGION),
    ("Country", COUNTRY),
    ("Year", YEAR),
    ("Measles_Cases", MEASLES),
    ("Rubella_Cases", RUBELLA),
    ("Population", POPULATION),
    ("Measles_Cases_Per_100K", MEASLES_PER100K),
    ("Rubella_Cases_Per_100K", RUBELLA_PER100K),
];

/// Numeric measure columns coerced to floating point during normalization.
pub const MEASURE_COLUMNS: [&str; 5] = [
    MEASLES,
    RUBELLA,
    POPULATION,
    MEASLES_PER100K,
    RUBELLA_PER100K,
];

/// Resolve a source header to its canonical name, if it is a known source column.
pub fn canonical_name(source: &str) -> Option<&'static str> {
    SOURCE_RENAMES
        .iter()
        .find(|(from, _)| *from == source)
        .map(|(_, to)| *to)
}

/// True when `name` is one of the canonical numeric measure columns.
pub fn is_measure_column(name: &str) -> bool {
    MEASURE_COLUMNS.contains(&name)
}
