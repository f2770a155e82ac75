// src/checker/http.rs
// =============================================================================
// This module checks a link's HTTP status with a single outbound request.
//
// Key functionality:
// - Makes an HTTP HEAD request (lightweight, no body download)
// - Falls back to GET when the server disallows HEAD (405/501)
// - Does NOT follow redirects: a 3xx is reported as-is with its first-hop
//   Location target, never the end of the chain
// - Classifies every possible outcome into a small status taxonomy
//
// The contract that matters most: check_link() always returns a value.
// Timeouts, DNS failures, refused connections, TLS errors and malformed
// URLs all come back as an Unreachable outcome with a cause string. No
// input can abort the batch, and one bad link never touches its neighbors.
// =============================================================================

use reqwest::{redirect, Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use anyhow::Result;

/// Default per-request bound, in seconds. One wait per link, no retries.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Browser-style User-Agent. Some sites answer bots with 403 regardless of
// whether the link actually works, which would pollute the report.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/91.0.4472.124 Safari/537.36";

// Represents the coarse status of a link after checking
//
// #[derive(Serialize, Deserialize)] lets us convert to/from JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    /// Link answered with 2xx
    Ok,
    /// Link answered with 3xx (we report the first hop, we don't follow)
    Redirected,
    /// Link answered with 4xx
    ClientError,
    /// Link answered with 5xx
    ServerError,
    /// The request never got a status line: DNS failure, refused
    /// connection, timeout, TLS error, or a URL the transport rejected
    Unreachable,
}

// Everything the checker learns about one link
//
// status_code is None exactly when the link was Unreachable; detail
// carries the redirect target or the human-readable failure cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: LinkStatus,
    pub status_code: Option<u16>,
    pub detail: Option<String>,
}

impl CheckOutcome {
    fn unreachable(cause: String) -> Self {
        CheckOutcome {
            status: LinkStatus::Unreachable,
            status_code: None,
            detail: Some(cause),
        }
    }
}

// Builds the shared HTTP client used for the whole run
//
// Built once, cheap-cloned into each task (reqwest's Client is a handle
// around a connection pool). Redirect policy is 'none' on purpose: the
// report shows the first-hop status code, not where a chain ends up.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .redirect(redirect::Policy::none())
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

// Checks a single link
//
// This function does the actual HTTP request and categorizes the result.
// It never returns an error: every outcome, including transport-level
// failure, is data.
pub async fn check_link(client: &Client, url: &str) -> CheckOutcome {
    // A string the URL parser rejects would only fail later inside
    // reqwest with a vaguer message, so surface it here
    if let Err(error) = Url::parse(url) {
        return CheckOutcome::unreachable(format!("invalid URL: {}", error));
    }

    // Try HEAD first: no body download, much cheaper on large pages
    match client.head(url).send().await {
        Ok(response) if head_disallowed(response.status()) => {
            // The server refuses HEAD specifically; one GET tells us
            // what it actually thinks of the link
            match client.get(url).send().await {
                Ok(response) => classify_response(response),
                Err(error) => categorize_error(error),
            }
        }
        Ok(response) => classify_response(response),
        Err(error) => categorize_error(error),
    }
}

// 405 Method Not Allowed and 501 Not Implemented are the two answers
// that mean "don't HEAD me", not "this link is broken"
fn head_disallowed(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED
    )
}

// Maps a numeric status code onto our taxonomy
//
// Returns None for codes outside the four ranges we report on (1xx and
// anything nonstandard), which the caller treats as unreachable so the
// classification stays total.
fn status_kind(code: u16) -> Option<LinkStatus> {
    match code {
        200..=299 => Some(LinkStatus::Ok),
        300..=399 => Some(LinkStatus::Redirected),
        400..=499 => Some(LinkStatus::ClientError),
        500..=599 => Some(LinkStatus::ServerError),
        _ => None,
    }
}

// Analyzes an HTTP response to determine link status
//
// HTTP status codes:
// - 200-299: Success
// - 300-399: Redirect (Location header becomes the detail)
// - 400-499: Client error (404 not found, etc.)
// - 500-599: Server error
fn classify_response(response: Response) -> CheckOutcome {
    let code = response.status().as_u16();

    match status_kind(code) {
        Some(LinkStatus::Redirected) => {
            // First-hop target only; we never follow the chain
            let target = response
                .headers()
                .get("location")
                .and_then(|value| value.to_str().ok())
                .map(|value| value.to_string());

            CheckOutcome {
                status: LinkStatus::Redirected,
                status_code: Some(code),
                detail: target,
            }
        }
        Some(status) => CheckOutcome {
            status,
            status_code: Some(code),
            detail: None,
        },
        None => CheckOutcome::unreachable(format!("unexpected status {}", code)),
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons: network timeout, DNS
// resolution failure, TLS certificate issues, refused connections.
// They all land in Unreachable; the detail string keeps the cause.
fn categorize_error(error: reqwest::Error) -> CheckOutcome {
    let error_string = error.to_string();

    let cause = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            format!("connection failed: {}", error_string)
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "TLS certificate error".to_string()
    } else {
        error_string
    };

    CheckOutcome::unreachable(cause)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why HEAD first?
//    - HEAD returns just the status line and headers, no body
//    - Over a big spreadsheet that saves a lot of bandwidth and time
//    - The 405/501 fallback covers the minority of servers that reject it
//
// 2. Why no redirect following?
//    - The report records the first-hop status code and Location target
//    - Following the chain would replace that with whatever the chain
//      ends on, which is a different (and here, unwanted) answer
//
// 3. Why does check_link never return Err?
//    - One bad row must not abort the batch
//    - Representing failure as a value (Unreachable + cause) makes the
//      "every row yields exactly one record" guarantee automatic
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_client(Duration::from_secs(5)).unwrap()
    }

    // Binds a port and immediately drops the listener, leaving a local
    // port that refuses connections
    fn refused_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    #[test]
    fn status_kind_covers_the_four_ranges() {
        assert_eq!(status_kind(200), Some(LinkStatus::Ok));
        assert_eq!(status_kind(204), Some(LinkStatus::Ok));
        assert_eq!(status_kind(301), Some(LinkStatus::Redirected));
        assert_eq!(status_kind(404), Some(LinkStatus::ClientError));
        assert_eq!(status_kind(500), Some(LinkStatus::ServerError));
        assert_eq!(status_kind(599), Some(LinkStatus::ServerError));
        assert_eq!(status_kind(100), None);
    }

    #[tokio::test]
    async fn ok_response_yields_ok_with_code() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/alive"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = check_link(&test_client(), &format!("{}/alive", server.uri())).await;
        assert_eq!(outcome.status, LinkStatus::Ok);
        assert_eq!(outcome.status_code, Some(200));
    }

    #[tokio::test]
    async fn not_found_yields_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let outcome = check_link(&test_client(), &format!("{}/missing", server.uri())).await;
        assert_eq!(outcome.status, LinkStatus::ClientError);
        assert_eq!(outcome.status_code, Some(404));
    }

    #[tokio::test]
    async fn server_error_yields_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = check_link(&test_client(), &format!("{}/broken", server.uri())).await;
        assert_eq!(outcome.status, LinkStatus::ServerError);
        assert_eq!(outcome.status_code, Some(503));
    }

    #[tokio::test]
    async fn redirect_reports_first_hop_only() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/moved"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("Location", "https://example.com/new"),
            )
            .mount(&server)
            .await;

        let outcome = check_link(&test_client(), &format!("{}/moved", server.uri())).await;
        assert_eq!(outcome.status, LinkStatus::Redirected);
        assert_eq!(outcome.status_code, Some(301));
        // The detail is the Location header verbatim, not a followed chain
        assert_eq!(outcome.detail.as_deref(), Some("https://example.com/new"));
    }

    #[tokio::test]
    async fn falls_back_to_get_when_head_disallowed() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let outcome = check_link(&test_client(), &format!("{}/no-head", server.uri())).await;
        assert_eq!(outcome.status, LinkStatus::Ok);
        assert_eq!(outcome.status_code, Some(200));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable_without_code() {
        let url = format!("http://127.0.0.1:{}/", refused_port());
        let outcome = check_link(&test_client(), &url).await;
        assert_eq!(outcome.status, LinkStatus::Unreachable);
        assert_eq!(outcome.status_code, None);
        assert!(outcome.detail.is_some());
    }

    #[tokio::test]
    async fn malformed_url_is_unreachable() {
        let outcome = check_link(&test_client(), "not a url").await;
        assert_eq!(outcome.status, LinkStatus::Unreachable);
        assert_eq!(outcome.status_code, None);

        let outcome = check_link(&test_client(), "").await;
        assert_eq!(outcome.status, LinkStatus::Unreachable);
    }
}
