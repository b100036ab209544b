//! Result export: CSV traces and JSON run summaries.

pub mod csv;
pub mod json;

pub use json::RunSummary;
