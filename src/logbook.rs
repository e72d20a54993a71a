// src/logbook.rs
// =============================================================================
// This module persists check results to per-site JSON log files.
//
// One file per checked address, named after the address with the scheme
// and a leading "www." stripped and slashes turned into dots, so
// "https://www.example.com/foo" logs to "example.com.foo".
//
// A log file maps each address to three deduplicated result lists:
//
//   { "https://example.com": { "good": [...],
//                              "bad": [[404, "..."], ...],
//                              "other": [["dns", "..."], ...] } }
//
// Writing is read-modify-write of the whole file: read the existing log
// if there is one (missing or malformed files count as empty), merge the
// new results in with set semantics, write everything back. The merged
// lists are kept sorted, so running the same check twice produces
// byte-identical files.
//
// A run that collected no good links and no bad links does not touch the
// filesystem at all.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::checker::FailureKind;

// The per-address results stored in a log file
//
// The lists are deduplicated and sorted on every write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogEntry {
    pub good: Vec<String>,
    pub bad: Vec<(u16, String)>,
    pub other: Vec<(FailureKind, String)>,
}

// A whole log file: address -> entry
//
// BTreeMap keeps the keys in a stable order across writes.
type LogBook = BTreeMap<String, LogEntry>;

// Computes the log file name for an address
//
// Strips the scheme, strips a leading "www.", and replaces slashes with
// dots so the name is filesystem-safe.
//
// Examples:
//   "https://www.example.com/foo" -> "example.com.foo"
//   "http://example.com"          -> "example.com"
pub fn log_name(address: &str) -> String {
    let stripped = address
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let stripped = stripped.strip_prefix("www.").unwrap_or(stripped);
    stripped.replace('/', ".")
}

// Merges one run's results into the address's log file
//
// Parameters:
//   logdir: directory holding the per-site logs (must exist)
//   address: the session's normalized address, used as the map key
//   goodlinks/badlinks/other: the run's result collections
//
// Returns:
//   Ok(Some(path)) after writing the merged log
//   Ok(None) when the run collected nothing and the filesystem was left
//   untouched
pub fn record(
    logdir: &Path,
    address: &str,
    goodlinks: &[String],
    badlinks: &[(u16, String)],
    other: &[(FailureKind, String)],
) -> Result<Option<PathBuf>> {
    // Nothing collected, nothing written. Only good and bad count here:
    // an other-only run is environment noise, not a result worth a file.
    if goodlinks.is_empty() && badlinks.is_empty() {
        return Ok(None);
    }

    let path = logdir.join(log_name(address));
    let mut book = read_book(&path);
    let entry = book.entry(address.to_string()).or_default();

    // Set-union merge: structural dedup, sorted output
    let mut good: BTreeSet<String> = entry.good.drain(..).collect();
    good.extend(goodlinks.iter().cloned());
    entry.good = good.into_iter().collect();

    let mut bad: BTreeSet<(u16, String)> = entry.bad.drain(..).collect();
    bad.extend(badlinks.iter().cloned());
    entry.bad = bad.into_iter().collect();

    let mut others: BTreeSet<(FailureKind, String)> = entry.other.drain(..).collect();
    others.extend(other.iter().cloned());
    entry.other = others.into_iter().collect();

    let serialized = serde_json::to_string_pretty(&book)?;
    fs::write(&path, serialized)
        .with_context(|| format!("failed to write log file {}", path.display()))?;

    Ok(Some(path))
}

// Reads an existing log file
//
// A missing file or one that doesn't parse as JSON yields an empty book;
// both cases just mean there is nothing to merge with.
fn read_book(path: &Path) -> LogBook {
    match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
        Err(_) => LogBook::new(),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is anyhow::Result?
//    - A type alias for Result<T, anyhow::Error>
//    - anyhow::Error can hold any error type
//    - Great for application code (vs libraries which should use specific
//      errors)
//    - The ? operator works seamlessly with it
//
// 2. What are BTreeMap and BTreeSet?
//    - Ordered collections: iteration always runs in sorted order
//    - The map keeps log keys stable across writes
//    - The sets deduplicate while sorting, which is why writing the same
//      results twice produces byte-identical files
//
// 3. Why Vec<(u16, String)> for bad links?
//    - A tuple pairs a status with the link that produced it
//    - serde serializes tuples as JSON arrays
//    - [[404, "https://..."], ...] round-trips cleanly
//
// 4. What does unwrap_or_default() do?
//    - Returns the parsed value on success
//    - Falls back to the type's Default (an empty map) on error
//    - This is how a malformed log file becomes an empty one
//
// 5. Why &[String] instead of Vec<String> parameters?
//    - &[..] is a borrowed slice: we only need to read the results
//    - Callers keep ownership of their collections
//    - No copying happens until the merge actually needs owned values
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn good(links: &[&str]) -> Vec<String> {
        links.iter().map(|l| l.to_string()).collect()
    }

    fn read_entry(path: &Path, address: &str) -> LogEntry {
        let book: LogBook = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        book.get(address).cloned().unwrap()
    }

    #[test]
    fn test_log_name_strips_scheme_and_www() {
        assert_eq!(log_name("https://www.example.com/foo"), "example.com.foo");
        assert_eq!(log_name("http://www.example.com"), "example.com");
        assert_eq!(log_name("https://example.com"), "example.com");
    }

    #[test]
    fn test_log_name_replaces_slashes_with_dots() {
        assert_eq!(log_name("https://example.com/a/b/c"), "example.com.a.b.c");
    }

    #[test]
    fn test_empty_run_leaves_the_filesystem_unchanged() {
        let dir = tempdir().unwrap();
        // An other-only run counts as empty too
        let other = vec![(FailureKind::Dns, "https://example.com/x".to_string())];
        let written = record(dir.path(), "https://example.com", &[], &[], &other).unwrap();

        assert!(written.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_record_writes_a_log_keyed_by_address() {
        let dir = tempdir().unwrap();
        let address = "https://www.example.com";
        let path = record(
            dir.path(),
            address,
            &good(&["https://example.com/a"]),
            &[(404, "https://example.com/b".to_string())],
            &[(FailureKind::Tls, "https://example.com/c".to_string())],
        )
        .unwrap()
        .unwrap();

        assert_eq!(path.file_name().unwrap(), "example.com");
        let entry = read_entry(&path, address);
        assert_eq!(entry.good, vec!["https://example.com/a"]);
        assert_eq!(entry.bad, vec![(404, "https://example.com/b".to_string())]);
        assert_eq!(
            entry.other,
            vec![(FailureKind::Tls, "https://example.com/c".to_string())]
        );
    }

    #[test]
    fn test_merging_is_idempotent() {
        let dir = tempdir().unwrap();
        let address = "https://example.com";
        let goodlinks = good(&["https://example.com/b", "https://example.com/a"]);
        let badlinks = vec![(500, "https://example.com/err".to_string())];

        let path = record(dir.path(), address, &goodlinks, &badlinks, &[])
            .unwrap()
            .unwrap();
        let first = fs::read(&path).unwrap();

        record(dir.path(), address, &goodlinks, &badlinks, &[]).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_runs_accumulate_with_set_semantics() {
        let dir = tempdir().unwrap();
        let address = "https://example.com";

        record(dir.path(), address, &good(&["https://example.com/a"]), &[], &[]).unwrap();
        let path = record(
            dir.path(),
            address,
            &good(&["https://example.com/a", "https://example.com/b"]),
            &[],
            &[],
        )
        .unwrap()
        .unwrap();

        let entry = read_entry(&path, address);
        assert_eq!(
            entry.good,
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_existing_log_is_actually_read_and_extended() {
        let dir = tempdir().unwrap();
        let address = "https://example.com";

        record(dir.path(), address, &good(&["https://example.com/old"]), &[], &[]).unwrap();
        let path = record(dir.path(), address, &good(&["https://example.com/new"]), &[], &[])
            .unwrap()
            .unwrap();

        let entry = read_entry(&path, address);
        assert_eq!(
            entry.good,
            vec!["https://example.com/new", "https://example.com/old"]
        );
    }

    #[test]
    fn test_malformed_log_is_treated_as_empty() {
        let dir = tempdir().unwrap();
        let address = "https://example.com";
        let path = dir.path().join(log_name(address));
        fs::write(&path, "not json at all {{{").unwrap();

        record(dir.path(), address, &good(&["https://example.com/a"]), &[], &[]).unwrap();

        let entry = read_entry(&path, address);
        assert_eq!(entry.good, vec!["https://example.com/a"]);
    }

    #[test]
    fn test_scheme_variants_share_a_file_but_not_an_entry() {
        // "http://example.com" and "https://example.com" produce the same
        // log name, so they land in the same file under their own keys
        let dir = tempdir().unwrap();

        record(
            dir.path(),
            "http://example.com",
            &good(&["http://example.com/a"]),
            &[],
            &[],
        )
        .unwrap();
        let path = record(
            dir.path(),
            "https://example.com",
            &good(&["https://example.com/a"]),
            &[],
            &[],
        )
        .unwrap()
        .unwrap();

        let book: LogBook = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(book.len(), 2);
        assert!(book.contains_key("http://example.com"));
        assert!(book.contains_key("https://example.com"));
    }
}
