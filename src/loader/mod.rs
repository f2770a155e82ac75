// src/loader/mod.rs
// =============================================================================
// This module reads the input table and hands the pipeline its raw links.
//
// Submodules:
// - table: XLSX/CSV parsing and column extraction
//
// The loader owns all file-format concerns; nothing downstream ever sees
// a spreadsheet, only an ordered Vec of raw link strings.
// =============================================================================

mod table;

pub use table::{load_links, SourceConfig};
