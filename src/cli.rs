// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The interface is flag-based: you give either a single --address or a
// --linkfile with one address per line, and optionally a --logfilepath
// directory where cumulative per-site results are stored.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Option<T>: Fields the user may or may not supply
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{ArgAction, ArgGroup, Parser};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
//
// The ArgGroup makes address/linkfile mutually exclusive and requires
// that exactly one of them is given
#[derive(Parser, Debug)]
#[command(
    name = "checklink",
    version = "0.1.0",
    about = "Check the links on a web page and classify them as good, bad, or other",
    long_about = "checklink fetches a page, extracts every anchor with an href, and checks \
                  each one with a single HTTP request. Results are bucketed as good (accepted \
                  status), bad (any other status), or other (environmental failures like DNS \
                  or TLS errors), and can be accumulated into per-site JSON logs across runs.",
    group(ArgGroup::new("target").required(true).args(["address", "linkfile"]))
)]
pub struct Cli {
    /// Address for doing a single link check run
    ///
    /// A bare address like 'example.com' gets a scheme prepended
    /// according to --ssl
    #[arg(short, long)]
    pub address: Option<String>,

    /// File with a list of addresses to read, one per line
    #[arg(short, long)]
    pub linkfile: Option<String>,

    /// Directory for writing/reading per-site JSON log files
    ///
    /// Each checked address gets its own log file, merged with any
    /// results from previous runs
    #[arg(short = 'L', long)]
    pub logfilepath: Option<String>,

    /// Is this site SSL-enabled? (default is true)
    ///
    /// Only affects addresses given without a scheme: true prepends
    /// https://, false prepends http://
    /// Pass an explicit value: --ssl false
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub ssl: bool,

    /// Prefix to prepend to each address before the scheme check
    ///
    /// Useful when checking an internal page whose top-level ("/foo")
    /// links belong to the parent site
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Output results in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<String> for most flags?
//    - Option represents a value that might not exist
//    - None means the user didn't pass the flag
//    - clap fills in Some(value) when they did
//
// 2. What are derive macros?
//    - #[derive(...)] automatically generates code for common operations
//    - Parser: generates CLI parsing logic
//    - Debug: generates code to print the struct for debugging
//
// 3. What is an ArgGroup?
//    - A named set of arguments that clap validates together
//    - required(true) means one member of the group must be present
//    - Members of a group conflict by default, so you can't pass both
//      --address and --linkfile at once
//
// 4. Why ArgAction::Set for --ssl?
//    - A plain bool flag can only switch something on
//    - Set makes the flag take an explicit value: --ssl false
//    - default_value_t supplies the value when the flag is absent,
//      which is how the default ends up being true
//
// 5. What does 'pub' mean?
//    - pub = public, meaning other modules can use this
//    - Without pub, items are private to this module
// -----------------------------------------------------------------------------
