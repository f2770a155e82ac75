// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Unlike tools with several modes, this one does exactly one thing
// (load -> normalize -> check -> report), so there is a single Parser
// struct and no subcommand enum.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::checker::DEFAULT_TIMEOUT_SECS;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "sheet-link-audit",
    version = "0.1.0",
    about = "Audit a spreadsheet column of links: normalize, check, and report",
    long_about = "sheet-link-audit reads hyperlinks from one column of an XLSX or CSV file, \
                  upgrades http:// links to https://, strips the igshid tracking parameter, \
                  checks each link's HTTP status once, and writes a PDF summary report."
)]
pub struct Cli {
    /// Path to the input spreadsheet (.xlsx) or CSV (.csv) file
    ///
    /// This is a positional argument (required, no flag needed)
    pub file: PathBuf,

    /// Header name of the column that holds the links
    ///
    /// Example: --column Website
    #[arg(long)]
    pub column: String,

    /// Worksheet name, for XLSX input only (defaults to the first sheet)
    ///
    /// Ignored when the input is a CSV file
    #[arg(long)]
    pub sheet: Option<String>,

    /// Output results in JSON format instead of a table
    ///
    /// This is an optional flag: --json
    #[arg(long)]
    pub json: bool,

    /// Path for the PDF report
    ///
    /// Defaults to <column>_report_<MM-DD_HH-MM>.pdf in the working directory
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    ///
    /// Each link gets exactly one bounded wait; there are no retries
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// How many checks may be in flight at once
    ///
    /// Results always come back in input-row order regardless of this value.
    /// Use 1 for strictly sequential checking.
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,
}
