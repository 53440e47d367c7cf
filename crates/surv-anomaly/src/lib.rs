//! Per-country outlier detection.
//!
//! Each country and feature set gets its own freshly constructed, seeded
//! isolation forest; model state is never shared and never persisted.
//!
//! - **forest**: the seeded isolation forest itself
//! - **detector**: per-country scoring over the wide table
//! - **sweep**: all-countries run, parallel with preserved result order
//! - **cache**: memoized per-country results keyed by dataset + parameters

pub mod cache;
pub mod detector;
pub mod forest;
pub mod sweep;

pub use cache::{AnomalyCache, AnomalyKey};
pub use detector::{AnomalyOptions, CountryAnomalies, MIN_OBSERVATIONS, detect_country};
pub use forest::{ForestOptions, IsolationForest, label_scores};
pub use sweep::{AnomalySweep, combine_country_frames, detect_all, unique_countries};
