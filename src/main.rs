// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run a check session for the single --address, or one session per
//    line of the --linkfile, strictly one after the other
// 3. Optionally merge each session's results into its per-site log
// 4. Print results and exit with a proper code
//    (0 = no bad links, 1 = bad links found, 2 = error)
//
// Rust concepts used:
// - async/await: The HTTP client is async; we await one request at a time
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to dispatch on the selected mode
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - href extraction and per-link checking
mod cli; // src/cli.rs - command-line parsing
mod logbook; // src/logbook.rs - per-site JSON result logs
mod session; // src/session.rs - one page-check lifecycle

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser; // Parser trait enables the parse() method
use serde_json::json;

use cli::Cli;
use session::Session;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = no bad links
//   Ok(1) = bad links found
//   Ok(2) is never constructed here; errors map to 2 in main
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // clap's ArgGroup guarantees exactly one of these is set
    match (cli.address.as_deref(), cli.linkfile.as_deref()) {
        (Some(address), _) => handle_address(address, &cli).await,
        (None, Some(linkfile)) => handle_linkfile(linkfile, &cli).await,
        (None, None) => Err(anyhow!("one of --address or --linkfile is required")),
    }
}

// Handles a single-address run
async fn handle_address(address: &str, cli: &Cli) -> Result<i32> {
    let mut session = Session::establish(address, cli.ssl, cli.prefix.as_deref()).await?;

    if !cli.json {
        println!(
            "🔍 Checking {} link(s) on {}",
            session.links.len(),
            session.address
        );
    }

    session.check().await?;

    if let Some(logdir) = cli.logfilepath.as_deref() {
        log_session(Path::new(logdir), &session, cli.json)?;
    }

    print_results(&session, cli.json)?;

    Ok(if session.has_badlinks() { 1 } else { 0 })
}

// Handles a linkfile run: one session per non-blank line, sequentially
//
// A failed page fetch aborts the whole run; per-link failures follow the
// usual bucketing rules inside each session.
async fn handle_linkfile(linkfile: &str, cli: &Cli) -> Result<i32> {
    let contents = std::fs::read_to_string(linkfile)
        .with_context(|| format!("failed to read linkfile {}", linkfile))?;

    let mut any_bad = false;
    let mut checked = 0usize;

    for line in contents.lines() {
        let address = line.trim();
        if address.is_empty() {
            continue;
        }

        let mut session = Session::establish(address, cli.ssl, cli.prefix.as_deref()).await?;

        if !cli.json {
            println!(
                "🔍 Checking {} link(s) on {}",
                session.links.len(),
                session.address
            );
        }

        session.check().await?;

        if let Some(logdir) = cli.logfilepath.as_deref() {
            log_session(Path::new(logdir), &session, cli.json)?;
        }

        print_results(&session, cli.json)?;

        any_bad = any_bad || session.has_badlinks();
        checked += 1;
    }

    if !cli.json {
        println!("📋 Checked {} address(es)", checked);
    }

    Ok(if any_bad { 1 } else { 0 })
}

// Merges one session's results into its per-site log
fn log_session(logdir: &Path, session: &Session, json: bool) -> Result<()> {
    let written = logbook::record(
        logdir,
        &session.address,
        &session.goodlinks,
        &session.badlinks,
        &session.other,
    )?;

    if !json {
        match written {
            Some(path) => println!("📝 Log updated: {}", path.display()),
            None => println!("📝 Nothing collected, log left untouched"),
        }
    }

    Ok(())
}

// Prints the results either as a table or JSON
fn print_results(session: &Session, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&results_json(session))?);
    } else {
        print_table(session);
    }
    Ok(())
}

// Builds the machine-readable form of one session's results
fn results_json(session: &Session) -> serde_json::Value {
    json!({
        "address": session.address,
        "good": session.goodlinks,
        "bad": session.badlinks,
        "other": session.other,
    })
}

// Prints results as a human-readable table in the terminal
fn print_table(session: &Session) {
    println!("{:<60} {:<12} {:<20}", "URL", "OUTCOME", "DETAIL");
    println!("{}", "=".repeat(92));

    for link in &session.goodlinks {
        println!("{:<60} {:<12} {:<20}", truncate_url(link), "✅ GOOD", "");
    }
    for (status, link) in &session.badlinks {
        println!(
            "{:<60} {:<12} {:<20}",
            truncate_url(link),
            "❌ BAD",
            format!("HTTP {}", status)
        );
    }
    for (kind, link) in &session.other {
        println!(
            "{:<60} {:<12} {:<20}",
            truncate_url(link),
            "⚠️  OTHER",
            kind.to_string()
        );
    }

    println!();

    // Print summary
    println!("📊 Summary for {}:", session.address);
    println!("   ✅ Good: {}", session.goodlinks.len());
    println!("   ❌ Bad: {}", session.badlinks.len());
    println!("   ⚠️  Other: {}", session.other.len());
}

// Truncate a URL if too long for display
fn truncate_url(url: &str) -> String {
    if url.chars().count() > 57 {
        let short: String = url.chars().take(57).collect();
        format!("{}...", short)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Serves an HTML page at the mock server's root
    async fn serve_page(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(body.to_string()),
            )
            .mount(server)
            .await;
    }

    async fn serve_status(server: &MockServer, route: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_linkfile_skips_blank_lines() {
        let server = MockServer::start().await;
        serve_page(&server, r#"<a href="/good">Good</a>"#).await;
        serve_status(&server, "/good", 200).await;

        // Blank and whitespace-only lines between the addresses; if they
        // were checked, "" would normalize to "https://" and the fetch
        // failure would abort the whole run
        let dir = tempfile::tempdir().unwrap();
        let linkfile = dir.path().join("links.txt");
        std::fs::write(
            &linkfile,
            format!("\n{}\n   \n{}\n\n", server.uri(), server.uri()),
        )
        .unwrap();

        let cli = Cli::try_parse_from(["checklink", "-l", linkfile.to_str().unwrap()]).unwrap();
        let code = handle_linkfile(linkfile.to_str().unwrap(), &cli)
            .await
            .unwrap();

        // Both real addresses checked out clean
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_linkfile_run_updates_the_logs() {
        let server = MockServer::start().await;
        serve_page(&server, r#"<a href="/good">Good</a>"#).await;
        serve_status(&server, "/good", 200).await;

        let dir = tempfile::tempdir().unwrap();
        let logdir = dir.path().join("logs");
        std::fs::create_dir(&logdir).unwrap();
        let linkfile = dir.path().join("links.txt");
        std::fs::write(&linkfile, format!("{}\n", server.uri())).unwrap();

        let cli = Cli::try_parse_from([
            "checklink",
            "-l",
            linkfile.to_str().unwrap(),
            "-L",
            logdir.to_str().unwrap(),
        ])
        .unwrap();
        let code = handle_linkfile(linkfile.to_str().unwrap(), &cli)
            .await
            .unwrap();

        assert_eq!(code, 0);
        // One address, one per-site log file
        assert_eq!(std::fs::read_dir(&logdir).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_bad_links_select_exit_code_one() {
        let server = MockServer::start().await;
        serve_page(&server, r#"<a href="/missing">Missing</a>"#).await;
        serve_status(&server, "/missing", 404).await;

        let uri = server.uri();
        let cli = Cli::try_parse_from(["checklink", "-a", &uri]).unwrap();
        let code = handle_address(&uri, &cli).await.unwrap();

        assert_eq!(code, 1);
    }

    #[tokio::test]
    async fn test_good_links_select_exit_code_zero() {
        let server = MockServer::start().await;
        serve_page(&server, r#"<a href="/good">Good</a>"#).await;
        serve_status(&server, "/good", 200).await;

        let uri = server.uri();
        // --json changes the output, not the exit code
        let cli = Cli::try_parse_from(["checklink", "--json", "-a", &uri]).unwrap();
        let code = handle_address(&uri, &cli).await.unwrap();

        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_json_output_shape() {
        let server = MockServer::start().await;
        serve_page(
            &server,
            r#"<a href="/good">G</a><a href="/missing">M</a><a href="../up">U</a>"#,
        )
        .await;
        serve_status(&server, "/good", 200).await;
        serve_status(&server, "/missing", 404).await;

        let mut session = Session::establish(&server.uri(), true, None).await.unwrap();
        session.check().await.unwrap();

        let value = results_json(&session);
        assert_eq!(value["address"], json!(session.address));
        assert_eq!(value["good"], json!([format!("{}/good", server.uri())]));
        assert_eq!(
            value["bad"],
            json!([[404, format!("{}/missing", server.uri())]])
        );
        assert_eq!(value["other"], json!([["encoding", "../up"]]));
    }
}
