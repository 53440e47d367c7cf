use std::path::PathBuf;

/// Result of one `analyze` run, consumed by the console summary.
#[derive(Debug)]
pub struct AnalyzeResult {
    pub source: PathBuf,
    /// Short dataset fingerprint prefix.
    pub dataset: String,
    pub output_dir: PathBuf,
    pub wide_rows: usize,
    pub long_rows: usize,
    /// Disease labels present in the input.
    pub diseases: Vec<String>,
    /// Distinct countries seen in the wide table.
    pub countries: usize,
    /// Countries with anomaly results.
    pub scored: usize,
    /// Countries skipped for insufficient history.
    pub skipped: Vec<String>,
    /// Rows flagged as an outlier by any feature set.
    pub flagged_rows: usize,
    pub long_csv: Option<PathBuf>,
    pub summary_report: Option<PathBuf>,
    pub anomalies_csv: Option<PathBuf>,
    /// Soft errors collected along the way (outputs that failed to write).
    pub errors: Vec<String>,
    pub has_errors: bool,
}
