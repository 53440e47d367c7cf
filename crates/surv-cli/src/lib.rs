//! Library surface of the surveillance CLI: logging setup, the staged
//! analysis pipeline, and the result types it reports.

pub mod logging;
pub mod pipeline;
pub mod types;
