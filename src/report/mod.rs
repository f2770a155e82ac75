// src/report/mod.rs
// =============================================================================
// This module turns the finished record list into the summary report.
//
// Submodules:
// - summary: counters derived from the records (per-status totals,
//   status-code tally, normalization counts)
// - pdf: renders records + summary into the PDF document
// =============================================================================

mod pdf;
mod summary;

pub use pdf::{default_report_path, write_pdf};
pub use summary::Summary;
