// src/pipeline/run.rs
// =============================================================================
// This module runs the whole pipeline over an ordered list of raw links.
//
// For each input row, in order:
// 1. Normalize the raw link (protocol upgrade, igshid removal)
// 2. Check the normalized link's HTTP status
// 3. Emit one record pairing the original, the normalized form, and the
//    outcome
//
// Checks run concurrently for throughput, but the output order is the
// input order: we use .buffered() (not .buffer_unordered()), which yields
// results in the order the futures were created. The report presents rows
// in this order, so ordering is correctness, not cosmetics.
//
// Isolation between rows is free: the checker never returns an error, so
// a dead link in row 3 cannot abort rows 4 through N.
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::checker::{self, LinkStatus};

// Represents the final result for one input row
//
// This is what the terminal table, the JSON output, and the PDF report
// all consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The URL exactly as it appeared in the source column
    pub original_url: String,
    /// The URL after normalization; this is what was actually checked
    pub normalized_url: String,
    /// Coarse classification of the check outcome
    pub status: LinkStatus,
    /// The HTTP status code, absent when the link was unreachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// Redirect target or failure cause, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl LinkRecord {
    /// A link counts as working if it answered 2xx or 3xx
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Ok | LinkStatus::Redirected)
    }
}

// Processes every raw link into a record, preserving input order
//
// concurrency controls how many checks are in flight at once; 1 gives
// strictly sequential behavior. The Client is cheap to clone (it is a
// handle over a shared connection pool), so each task gets its own copy.
pub async fn process(client: &Client, raw_links: Vec<String>, concurrency: usize) -> Vec<LinkRecord> {
    let concurrency = concurrency.max(1);

    let futures = raw_links.into_iter().map(|raw| {
        let client = client.clone();
        async move {
            let normalized = checker::normalize(&raw);
            let outcome = checker::check_link(&client, &normalized).await;

            LinkRecord {
                original_url: raw,
                normalized_url: normalized,
                status: outcome.status,
                status_code: outcome.status_code,
                detail: outcome.detail,
            }
        }
    });

    // .buffered(n) runs up to n futures at once and yields results in
    // the order the futures were queued
    stream::iter(futures).buffered(concurrency).collect().await
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why .buffered() and not .buffer_unordered()?
//    - buffer_unordered yields results as they finish, which scrambles
//      the order when a slow link sits next to a fast one
//    - buffered yields in queue order while still overlapping the waits
//    - The report presents rows in source-row order, so we need the latter
//
// 2. Why clone the client?
//    - Each async task needs its own handle to the client
//    - Client is cheap to clone (it's a reference counter internally)
//    - This is a common pattern in async Rust
// -----------------------------------------------------------------------------
