// src/session.rs
// =============================================================================
// This module implements one page-check session.
//
// A session's life is strictly linear:
// 1. Normalize the address (trim, optional prefix, scheme per the ssl flag)
// 2. Fetch the page with a single GET and extract every href, in order
// 3. Check each link one at a time, bucketing results as good/bad/other
//
// The session owns one HTTP client and reuses it for the page fetch and
// every link check. The client never follows redirects: 301/302 count as
// live links, so they must reach classification as statuses.
//
// Resolution rules for hrefs, applied at check time:
// - "/foo" is resolved against the scheme and host of the session's own
//   address (site-relative resolution only)
// - "mailto..." and "#..." are skipped without a request
// - everything else is checked exactly as written; in particular,
//   path-relative hrefs like "../x" are NOT resolved and will usually
//   land in the other bucket as unencodable
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::checker::{self, FailureKind, LinkOutcome};

// One fetch target and its accumulated results
//
// `links` holds the raw hrefs from the fetched page. The three result
// collections stay empty until check() runs; they keep document order.
pub struct Session {
    /// The normalized address the page was fetched from
    pub address: String,
    /// Raw hrefs extracted from the page, in document order
    pub links: Vec<String>,
    /// Links whose status was in the accepted set
    pub goodlinks: Vec<String>,
    /// (status, link) pairs for every other status
    pub badlinks: Vec<(u16, String)>,
    /// (failure kind, link) pairs for recognized environmental failures
    pub other: Vec<(FailureKind, String)>,
    client: Client,
}

impl Session {
    // Normalizes the address, fetches the page, and extracts its links
    //
    // Fails (propagating to the caller) if the page request itself
    // fails; there is no retry. A response with a non-success status
    // still counts as a fetched page: whatever body came back is parsed
    // for links, exactly like a browser would render it.
    pub async fn establish(address: &str, ssl: bool, prefix: Option<&str>) -> Result<Self> {
        let address = normalize_address(address, ssl, prefix);

        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("failed to build HTTP client")?;

        let response = client
            .get(&address)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", address))?;
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read the body of {}", address))?;

        let links = checker::extract_hrefs(&body);

        Ok(Self {
            address,
            links,
            goodlinks: Vec::new(),
            badlinks: Vec::new(),
            other: Vec::new(),
            client,
        })
    }

    // Checks every extracted link, one request at a time, in page order
    //
    // Recognized environmental failures are recorded in `other`; any
    // unrecognized failure aborts the remaining checks and propagates.
    pub async fn check(&mut self) -> Result<()> {
        for href in &self.links {
            let link = match resolve_href(&self.address, href) {
                Resolution::Skip => continue,
                Resolution::Check(link) => link,
            };

            match checker::check_link(&self.client, &link).await? {
                LinkOutcome::Good(_) => self.goodlinks.push(link),
                LinkOutcome::Bad(status) => self.badlinks.push((status, link)),
                LinkOutcome::Other(kind) => self.other.push((kind, link)),
            }
        }
        Ok(())
    }

    /// True if any checked link landed in the bad bucket
    pub fn has_badlinks(&self) -> bool {
        !self.badlinks.is_empty()
    }
}

// Builds the address a session will fetch
//
// Order matters: trim first, then the prefix, then the scheme check, so
// a prefix that itself carries a scheme suppresses the prepend.
//
// Examples:
//   ("example.com", ssl=true, None)  -> "https://example.com"
//   ("example.com", ssl=false, None) -> "http://example.com"
//   ("  https://example.com ", ssl=false, None) -> "https://example.com"
pub fn normalize_address(address: &str, ssl: bool, prefix: Option<&str>) -> String {
    let mut address = address.trim().to_string();

    if let Some(prefix) = prefix {
        address = format!("{}{}", prefix, address);
    }

    if !address.starts_with("http://") && !address.starts_with("https://") {
        let scheme = if ssl { "https" } else { "http" };
        address = format!("{}://{}", scheme, address);
    }

    address
}

// What to do with one raw href
enum Resolution {
    /// No request: mailto and fragment-only hrefs
    Skip,
    /// Request this (possibly resolved) link
    Check(String),
}

// Applies the resolution rules to one raw href
//
// Only root-relative hrefs ("/foo") are resolved, using the scheme and
// host of the session's own address. Anything else that isn't skipped is
// checked verbatim.
fn resolve_href(address: &str, href: &str) -> Resolution {
    if href.starts_with('/') {
        return match site_root(address) {
            Some(root) => Resolution::Check(format!("{}{}", root, href)),
            None => Resolution::Check(href.to_string()),
        };
    }

    if href.starts_with("mailto") || href.starts_with('#') {
        return Resolution::Skip;
    }

    Resolution::Check(href.to_string())
}

// "<scheme>://<host>" (plus the port, when the address carries one)
fn site_root(address: &str) -> Option<String> {
    let url = Url::parse(address).ok()?;
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}://{}:{}", url.scheme(), host, port)),
        None => Some(format!("{}://{}", url.scheme(), host)),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does establish() do the fetch?
//    - A session isn't useful without its page
//    - Failing construction early means every session that exists is valid
//    - Callers handle one error path instead of checking half-built state
//
// 2. How can check() read self.links while pushing to self.goodlinks?
//    - The loop borrows self.links immutably and the push borrows
//      self.goodlinks mutably
//    - Rust tracks borrows per field, and these fields are disjoint
//    - If both went through a method taking &mut self, this wouldn't
//      compile - direct field access is what makes it work
//
// 3. What is the Resolution enum for?
//    - "skip this href" and "check this link" are the only two answers
//    - An enum makes the skip path impossible to forget in a match
//    - Tests can assert on it with matches!
//
// 4. Why Option<&str> for the prefix?
//    - Option models "the caller may not have a prefix"
//    - &str borrows the text instead of taking ownership
//    - as_deref() on an Option<String> produces exactly this type
//
// 5. What is tokio doing here?
//    - It's the async runtime that drives the HTTP client
//    - Awaiting one request at a time keeps the checks sequential
//    - async could run checks concurrently, but page order matters here
//
// 6. What does .ok()? do in site_root?
//    - .ok() turns a Result into an Option, dropping the error
//    - ? on an Option returns None early
//    - Together: "if this step fails, the whole function returns None"
// -----------------------------------------------------------------------------
