// src/report/summary.rs
// =============================================================================
// Aggregate counters over the finished record list.
//
// These feed both the terminal summary footer and the PDF report:
// per-status totals, a tally of every HTTP status code seen, and counts
// of what normalization actually changed (http->https upgrades, igshid
// removals).
// =============================================================================

use std::collections::BTreeMap;

use crate::checker::{has_tracking_param, LinkStatus};
use crate::pipeline::LinkRecord;

/// Aggregated results for one audit run
#[derive(Debug, Default, Clone)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub redirected: usize,
    pub client_error: usize,
    pub server_error: usize,
    pub unreachable: usize,
    /// Links rewritten from http:// to https://
    pub upgraded: usize,
    /// Links that had an igshid parameter removed
    pub stripped: usize,
    /// How often each HTTP status code was seen (unreachable links have
    /// no code and are counted in `unreachable` instead)
    pub status_codes: BTreeMap<u16, usize>,
}

impl Summary {
    pub fn from_records(records: &[LinkRecord]) -> Self {
        let mut summary = Summary {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            match record.status {
                LinkStatus::Ok => summary.ok += 1,
                LinkStatus::Redirected => summary.redirected += 1,
                LinkStatus::ClientError => summary.client_error += 1,
                LinkStatus::ServerError => summary.server_error += 1,
                LinkStatus::Unreachable => summary.unreachable += 1,
            }

            if let Some(code) = record.status_code {
                *summary.status_codes.entry(code).or_insert(0) += 1;
            }

            if record.original_url.starts_with("http://")
                && record.normalized_url.starts_with("https://")
            {
                summary.upgraded += 1;
            }
            if has_tracking_param(&record.original_url) {
                summary.stripped += 1;
            }
        }

        summary
    }

    /// Links that answered 2xx or 3xx
    pub fn working(&self) -> usize {
        self.ok + self.redirected
    }

    /// Links that answered 4xx/5xx or never answered
    pub fn broken(&self) -> usize {
        self.client_error + self.server_error + self.unreachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(original: &str, normalized: &str, status: LinkStatus, code: Option<u16>) -> LinkRecord {
        LinkRecord {
            original_url: original.to_string(),
            normalized_url: normalized.to_string(),
            status,
            status_code: code,
            detail: None,
        }
    }

    #[test]
    fn counts_every_status_kind() {
        let records = vec![
            record("https://a.com", "https://a.com", LinkStatus::Ok, Some(200)),
            record("https://b.com", "https://b.com", LinkStatus::Ok, Some(204)),
            record("https://c.com", "https://c.com", LinkStatus::Redirected, Some(301)),
            record("https://d.com", "https://d.com", LinkStatus::ClientError, Some(404)),
            record("https://e.com", "https://e.com", LinkStatus::ServerError, Some(500)),
            record("https://f.com", "https://f.com", LinkStatus::Unreachable, None),
        ];

        let summary = Summary::from_records(&records);
        assert_eq!(summary.total, 6);
        assert_eq!(summary.ok, 2);
        assert_eq!(summary.redirected, 1);
        assert_eq!(summary.client_error, 1);
        assert_eq!(summary.server_error, 1);
        assert_eq!(summary.unreachable, 1);
        assert_eq!(summary.working(), 3);
        assert_eq!(summary.broken(), 3);
    }

    #[test]
    fn tallies_status_codes_and_skips_unreachable() {
        let records = vec![
            record("https://a.com", "https://a.com", LinkStatus::Ok, Some(200)),
            record("https://b.com", "https://b.com", LinkStatus::Ok, Some(200)),
            record("https://c.com", "https://c.com", LinkStatus::ClientError, Some(404)),
            record("https://d.com", "https://d.com", LinkStatus::Unreachable, None),
        ];

        let summary = Summary::from_records(&records);
        assert_eq!(summary.status_codes.get(&200), Some(&2));
        assert_eq!(summary.status_codes.get(&404), Some(&1));
        assert_eq!(summary.status_codes.len(), 2);
    }

    #[test]
    fn counts_normalization_changes() {
        let records = vec![
            record(
                "http://a.com/x?igshid=1",
                "https://a.com/x",
                LinkStatus::Ok,
                Some(200),
            ),
            record("http://b.com", "https://b.com", LinkStatus::Ok, Some(200)),
            record("https://c.com", "https://c.com", LinkStatus::Ok, Some(200)),
        ];

        let summary = Summary::from_records(&records);
        assert_eq!(summary.upgraded, 2);
        assert_eq!(summary.stripped, 1);
    }
}
