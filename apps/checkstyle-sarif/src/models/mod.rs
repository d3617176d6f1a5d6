//! Shared data models: the intermediate Checkstyle report, the SARIF output
//! graph, and batch outcome structs used by printers.

pub mod checkstyle;
pub mod sarif;

pub use checkstyle::{CheckstyleError, CheckstyleFile, CheckstyleReport, Severity};
pub use sarif::SarifLog;

use serde::Serialize;

#[derive(Debug, Serialize)]
/// Outcome of converting one report in a batch run.
pub struct BatchItem {
    pub input: String,
    pub output: Option<String>,
    pub results: usize,
    pub rules: usize,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
/// Aggregated batch summary used by printers.
pub struct BatchSummary {
    pub converted: usize,
    pub failed: usize,
    pub results: usize,
}

#[derive(Debug, Serialize)]
/// Batch results container.
pub struct BatchResult {
    pub results: Vec<BatchItem>,
    pub summary: BatchSummary,
}
