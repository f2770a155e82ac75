// src/checker/normalize.rs
// =============================================================================
// This module rewrites a raw link into its canonical form before checking.
//
// Two rewrites, applied in this order:
// 1. Protocol upgrade: a literal "http://" prefix becomes "https://"
// 2. Tracking-parameter removal: any "igshid" query parameter is dropped
//
// Order matters: parameter stripping must see the final host form.
//
// Everything here is a pure string transformation - no I/O, no failure
// path. A malformed URL passes through unchanged; deciding whether it is
// reachable is the HTTP checker's job, not ours. We deliberately avoid
// url::Url here: it would percent-re-encode the query, and untouched
// parameters must keep their original order and form.
// =============================================================================

/// The Instagram tracking parameter we strip from links
const TRACKING_PARAM: &str = "igshid";

// Normalizes a raw link string
//
// Total function: every input produces an output, including the empty
// string (which comes back unchanged). Applying it twice gives the same
// result as applying it once.
//
// Example input:
//   "http://example.com/a?x=1&igshid=abc"
//
// Example output:
//   "https://example.com/a?x=1"
pub fn normalize(raw: &str) -> String {
    strip_tracking_param(&upgrade_protocol(raw))
}

// Step 1: upgrade "http://" to "https://"
//
// Strings already on https://, or without a recognized protocol prefix,
// are left alone. No other scheme rewriting happens here.
fn upgrade_protocol(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

// Step 2: remove the igshid query parameter, if present
//
// The match is on the full parameter key - a parameter named "igshidden"
// must survive. Other parameters keep their original order and form, and
// a #fragment after the query survives untouched. If stripping empties
// the query, the trailing '?' goes too.
fn strip_tracking_param(url: &str) -> String {
    // Split off the fragment first so a value like "abc#top" can't drag
    // the fragment away with the parameter
    let (without_fragment, fragment) = match url.split_once('#') {
        Some((before, after)) => (before, Some(after)),
        None => (url, None),
    };

    let stripped = match without_fragment.split_once('?') {
        Some((base, query)) => {
            let kept: Vec<&str> = query
                .split('&')
                .filter(|pair| param_key(pair) != TRACKING_PARAM)
                .collect();

            if kept.is_empty() {
                base.to_string()
            } else {
                format!("{}?{}", base, kept.join("&"))
            }
        }
        // No query string, nothing to strip
        None => without_fragment.to_string(),
    };

    match fragment {
        Some(fragment) => format!("{}#{}", stripped, fragment),
        None => stripped,
    }
}

// Extracts the key from a "key=value" query component
//
// A bare component without '=' is treated as a key with no value,
// so "?igshid" (valueless) is still recognized and stripped.
fn param_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(key, _)| key)
}

// Helper for the report summary: does this link carry the tracking
// parameter? Comparing a raw link against its normalized form with this
// tells us whether stripping actually happened.
pub(crate) fn has_tracking_param(url: &str) -> bool {
    let without_fragment = url.split_once('#').map_or(url, |(before, _)| before);

    match without_fragment.split_once('?') {
        Some((_, query)) => query.split('&').any(|pair| param_key(pair) == TRACKING_PARAM),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upgrades_http_to_https() {
        assert_eq!(normalize("http://example.com"), "https://example.com");
    }

    #[test]
    fn leaves_https_alone() {
        assert_eq!(normalize("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn leaves_unrecognized_prefix_alone() {
        assert_eq!(normalize("ftp://example.com"), "ftp://example.com");
        assert_eq!(normalize("example.com/page"), "example.com/page");
    }

    #[test]
    fn empty_string_passes_through() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn strips_sole_igshid_and_question_mark() {
        assert_eq!(
            normalize("http://example.com/a?igshid=123"),
            "https://example.com/a"
        );
    }

    #[test]
    fn preserves_other_params_in_order() {
        assert_eq!(
            normalize("https://example.com/a?x=1&igshid=abc&y=2"),
            "https://example.com/a?x=1&y=2"
        );
    }

    #[test]
    fn strips_igshid_in_first_position() {
        assert_eq!(
            normalize("https://example.com/a?igshid=abc&y=2"),
            "https://example.com/a?y=2"
        );
    }

    #[test]
    fn does_not_match_param_name_prefix() {
        // "igshidden" is a different parameter and must survive
        assert_eq!(
            normalize("https://example.com/page?igshidden=1"),
            "https://example.com/page?igshidden=1"
        );
    }

    #[test]
    fn strips_valueless_igshid() {
        assert_eq!(
            normalize("https://example.com/a?igshid"),
            "https://example.com/a"
        );
    }

    #[test]
    fn keeps_fragment_when_stripping() {
        assert_eq!(
            normalize("https://example.com/a?igshid=1#top"),
            "https://example.com/a#top"
        );
    }

    #[test]
    fn is_idempotent() {
        let inputs = [
            "",
            "http://example.com/a?igshid=123",
            "https://example.com/a?x=1&igshid=abc&y=2",
            "https://example.com/page?igshidden=1",
            "not a url at all",
            "//cdn.example.com/asset",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn detects_tracking_param() {
        assert!(has_tracking_param("https://e.com/a?igshid=1"));
        assert!(has_tracking_param("https://e.com/a?x=1&igshid=1"));
        assert!(!has_tracking_param("https://e.com/a?igshidden=1"));
        assert!(!has_tracking_param("https://e.com/a"));
    }
}
