//! Core data model for the surveillance pipeline.
//!
//! This crate defines the vocabulary shared by every other crate:
//!
//! - **columns**: canonical wide-table column names and the source rename map
//! - **disease**: the disease metric enum used to key the long table
//! - **params**: validated tuning parameters for anomaly detection
//! - **cache**: a small keyed cache used for memoizing pipeline outputs
//! - **error**: the shared error type

pub mod cache;
pub mod columns;
pub mod disease;
pub mod error;
pub mod params;

pub use cache::ResultCache;
pub use disease::Disease;
pub use error::{Result, SurvError};
pub use params::Contamination;
