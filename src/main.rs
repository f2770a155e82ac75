// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the link column from the input file
// 3. Run the normalize-then-check pipeline over every row
// 4. Print results (table or JSON) and write the PDF report
// 5. Exit with proper code (0 = all working, 1 = broken links, 2 = error)
//
// The pipeline itself never fails per-row: a dead link becomes an
// "unreachable" record, not an abort. The only things that can end the
// run early are program-level problems (bad file, missing column,
// unwritable report path).
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - normalization + HTTP status checking
mod cli; // src/cli.rs - command-line parsing
mod loader; // src/loader/ - XLSX/CSV column extraction
mod pipeline; // src/pipeline/ - ordered per-row orchestration
mod report; // src/report/ - summary counters + PDF rendering

use clap::Parser;
use cli::Cli;
use loader::SourceConfig;
use pipeline::LinkRecord;
use report::Summary;
use std::time::Duration;

// anyhow::Result lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // Program-level error: print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = every link answered 2xx/3xx
//   Ok(1) = at least one broken link
//   Err   = program-level error (becomes exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Explicit configuration structure for the loader; no globals
    let config = SourceConfig {
        path: cli.file.clone(),
        sheet: cli.sheet.clone(),
        column: cli.column.clone(),
    };

    println!("🔍 Reading links from: {}", config.path.display());
    let links = loader::load_links(&config)?;

    if links.is_empty() {
        println!("⚠️  No links found in column '{}'", config.column);
        return Ok(0);
    }

    println!("📄 Found {} link(s) in column '{}'", links.len(), config.column);
    println!("\n🌐 Checking {} link(s)...\n", links.len());

    // One shared client for the whole run; the timeout is the single
    // bounded wait each link gets
    let client = checker::build_client(Duration::from_secs(cli.timeout))?;
    let records = pipeline::process(&client, links, cli.concurrency).await;

    print_results(&records, cli.json)?;

    // Write the PDF report
    let summary = Summary::from_records(&records);
    let report_path = cli
        .output
        .clone()
        .unwrap_or_else(|| report::default_report_path(&config.column));
    report::write_pdf(&records, &summary, &config.column, &report_path)?;
    println!("📑 PDF report written to {}", report_path.display());

    if summary.broken() > 0 {
        Ok(1) // Exit code 1 = broken links found
    } else {
        Ok(0) // Exit code 0 = all good
    }
}

// Prints the results either as a table or JSON
fn print_results(records: &[LinkRecord], json: bool) -> Result<()> {
    if json {
        // Serialize records to JSON and print
        let json_output = serde_json::to_string_pretty(records)?;
        println!("{}", json_output);
    } else {
        // Print human-readable table
        print_table(records);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(records: &[LinkRecord]) {
    // Print table header
    println!("{:<60} {:<18} {:<6} {:<30}", "URL", "STATUS", "CODE", "DETAIL");
    println!("{}", "=".repeat(114));

    // Print each record, in input-row order
    for record in records {
        let status_display = format_status(record.status);
        let code_display = record
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string());
        let detail = record.detail.as_deref().unwrap_or("");

        // Truncate URL if too long for display (by chars, URLs from
        // spreadsheets are not always ASCII)
        let url_display = if record.normalized_url.chars().count() > 57 {
            let kept: String = record.normalized_url.chars().take(57).collect();
            format!("{}...", kept)
        } else {
            record.normalized_url.clone()
        };

        println!(
            "{:<60} {:<18} {:<6} {:<30}",
            url_display, status_display, code_display, detail
        );
    }

    println!();

    // Print summary
    let summary = Summary::from_records(records);
    println!("📊 Summary:");
    println!("   ✅ Working: {}", summary.working());
    println!("   ❌ Broken: {}", summary.broken());
    println!("   🔒 Upgraded to https: {}", summary.upgraded);
    println!("   ✂️  igshid removed: {}", summary.stripped);
    println!("   📋 Total: {}", summary.total);
}

// Formats the status enum as a short labeled string
fn format_status(status: checker::LinkStatus) -> String {
    match status {
        checker::LinkStatus::Ok => "✅ OK".to_string(),
        checker::LinkStatus::Redirected => "🔀 REDIRECT".to_string(),
        checker::LinkStatus::ClientError => "❌ CLIENT ERROR".to_string(),
        checker::LinkStatus::ServerError => "💥 SERVER ERROR".to_string(),
        checker::LinkStatus::Unreachable => "🌐 UNREACHABLE".to_string(),
    }
}
