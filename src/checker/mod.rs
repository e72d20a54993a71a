// src/checker/mod.rs
// =============================================================================
// This module contains the low-level pieces of link checking.
//
// Submodules:
// - html: Extracts raw href values from a fetched page
// - http: Checks one link with one request and buckets the outcome
//
// This file (mod.rs) is the module root - it ties everything together and
// exports the public API that the session layer builds on.
// =============================================================================

mod html;
mod http;

// Re-export public items from submodules
// This lets users write `checker::check_link()` instead of
// `checker::http::check_link()`
pub use html::extract_hrefs;
pub use http::{check_link, FailureKind, LinkOutcome};

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is mod.rs?
//    - When you have a directory as a module (like src/checker/), the
//      mod.rs file inside it is the module root
//    - It's like index.js in JavaScript or __init__.py in Python
//
// 2. Why use 'pub use'?
//    - It re-exports items from submodules
//    - Makes the API cleaner for users of this module
//    - They don't need to know about our internal organization
//
// 3. Module privacy:
//    - By default, modules are private
//    - We explicitly choose what to make public with 'pub'
//    - This gives us control over our API surface
// -----------------------------------------------------------------------------
