// src/checker/mod.rs
// =============================================================================
// This module contains the two per-link stages of the pipeline.
//
// Submodules:
// - normalize: pure rewriting of a raw link (protocol upgrade, igshid strip)
// - http: the one HTTP request per link and its outcome classification
//
// This file (mod.rs) is the module root - it re-exports the public API so
// callers write `checker::normalize()` instead of reaching into submodules.
// =============================================================================

mod http;
mod normalize;

pub use http::{build_client, check_link, CheckOutcome, LinkStatus, DEFAULT_TIMEOUT_SECS};
pub use normalize::normalize;

pub(crate) use normalize::has_tracking_param;
