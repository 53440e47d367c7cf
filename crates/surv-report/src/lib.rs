//! Exports and reports consumed downstream of the pipeline.
//!
//! - **csv_export**: delimited-text exports of the long table and of
//!   arbitrary frames (anomaly output)
//! - **summary**: plain-text summary report with descriptive statistics
//!   and a long-table preview

pub mod csv_export;
pub mod error;
pub mod summary;

pub use csv_export::{long_csv_bytes, write_frame_csv, write_long_csv};
pub use error::ReportError;
pub use summary::{render_summary, write_summary_report};
