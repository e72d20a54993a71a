// src/checker/http.rs
// =============================================================================
// This module checks a single link by making one HTTP request.
//
// Key functionality:
// - Makes one GET request per link (redirects are never followed, so
//   301/302 surface as the response status)
// - Buckets the response into a closed outcome type: good, bad, or other
// - "Other" covers environmental failures (DNS, TLS, connection reset,
//   unencodable URLs) that may say more about the machine running the
//   check than about the target link
// - Any failure outside those recognized kinds propagates as an error
//   and aborts the rest of the run
//
// Rust concepts:
// - async/await: For network I/O
// - Enums: To represent the outcome buckets
// - Result<T, E>: Recognized failures are values, everything else is an
//   error for the caller
// =============================================================================

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Statuses that count as a working link
//
// 301/302 are in the set because the request is made without following
// redirects: a link that redirects somewhere is still a live link.
const GOOD_STATUSES: [u16; 4] = [200, 206, 301, 302];

// The recognized environmental failure kinds
//
// These are the failures that get recorded as "other" instead of
// aborting the run. Serialized as snake_case strings in logs and JSON
// output (e.g. "connection_reset").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Could not resolve the hostname
    Dns,
    /// TLS/SSL handshake or certificate failure
    Tls,
    /// The connection was reset by the peer
    ConnectionReset,
    /// The link could not be turned into a request at all
    /// (invalid or non-encodable URL, e.g. an unresolved "../x")
    Encoding,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::Dns => "dns",
            FailureKind::Tls => "tls",
            FailureKind::ConnectionReset => "connection_reset",
            FailureKind::Encoding => "encoding",
        };
        write!(f, "{}", name)
    }
}

// The outcome of checking one link
//
// Good and Bad carry the HTTP status that produced them; Other carries
// the recognized failure kind. There is no variant for unrecognized
// failures: those travel the error path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Status was in the accepted set {200, 206, 301, 302}
    Good(u16),
    /// Any other HTTP status
    Bad(u16),
    /// A recognized environmental failure, no status available
    Other(FailureKind),
}

// Checks a single link with one GET request
//
// Parameters:
//   client: the session's HTTP client (reused across all checks)
//   link: the resolved link to request
//
// Returns:
//   Ok(outcome) for anything we can bucket
//   Err(..) for request failures outside the recognized kinds
pub async fn check_link(client: &Client, link: &str) -> Result<LinkOutcome> {
    match client.get(link).send().await {
        Ok(response) => Ok(classify_status(response.status().as_u16())),
        Err(error) => match recognize_failure(&error) {
            Some(kind) => Ok(LinkOutcome::Other(kind)),
            None => Err(error.into()),
        },
    }
}

// Buckets an HTTP status into good or bad
fn classify_status(status: u16) -> LinkOutcome {
    if GOOD_STATUSES.contains(&status) {
        LinkOutcome::Good(status)
    } else {
        LinkOutcome::Bad(status)
    }
}

// Maps a reqwest error onto a recognized failure kind, if it is one
//
// reqwest wraps the interesting detail (DNS lookup failed, certificate
// rejected, ...) in its error source chain, so we collect the messages
// of the whole chain and inspect them.
fn recognize_failure(error: &reqwest::Error) -> Option<FailureKind> {
    use std::error::Error as _;

    if error.is_builder() {
        // The link never became a request: invalid or non-encodable URL
        return Some(FailureKind::Encoding);
    }

    let mut messages = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        messages.push_str("; ");
        messages.push_str(&cause.to_string());
        source = cause.source();
    }
    let messages = messages.to_lowercase();

    if messages.contains("dns") || messages.contains("failed to lookup") {
        Some(FailureKind::Dns)
    } else if messages.contains("certificate") || messages.contains("tls") || messages.contains("ssl") {
        Some(FailureKind::Tls)
    } else if messages.contains("connection reset") {
        Some(FailureKind::ConnectionReset)
    } else {
        None
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why async/await?
//    - Network I/O is slow (milliseconds to seconds)
//    - async/await is Rust's way of writing non-blocking I/O that's easy
//      to read
//    - The caller awaits one check at a time, so there is no concurrency
//      here, just async plumbing for the HTTP client
//
// 2. Why an enum for the outcome?
//    - Good/Bad/Other is a closed set of possibilities
//    - match forces every case to be handled
//    - Carrying the status or kind inside the variant keeps the data
//      next to its meaning
//
// 3. What is Result<T, E> doing here?
//    - Recognized failures are values: Ok(LinkOutcome::Other(..))
//    - Everything else is an error for the caller to deal with
//    - The ? operator in the caller propagates it up and stops the run
//
// 4. What is an error source chain?
//    - Errors often wrap the lower-level error that caused them
//    - source() walks one level down the chain
//    - The interesting detail ("dns error", "certificate") usually sits
//      near the bottom, so we collect the whole chain before matching
//
// 5. What does .await do?
//    - Waits for an async operation to complete
//    - Yields control to other tasks while waiting
//    - Only works inside async functions
// -----------------------------------------------------------------------------
