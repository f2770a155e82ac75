// src/pipeline/mod.rs
// =============================================================================
// This module orchestrates the per-link stages over a whole input column.
//
// Submodules:
// - run: normalize-then-check over every row, producing one record per row
//
// The invariant the rest of the program leans on: the output sequence has
// exactly one record per input link, in input order, no matter which
// checks fail.
// =============================================================================

mod run;

pub use run::{process, LinkRecord};
