// src/loader/table.rs
// =============================================================================
// This module loads the link column out of the input file.
//
// Supported formats:
// - .xlsx via the calamine crate (read-only spreadsheet parser)
// - .csv via the csv crate
//
// Behavior that the rest of the program relies on:
// - the first row is the header row; the column is found by exact
//   (whitespace-trimmed) header match
// - empty cells are skipped, so the returned list holds only actual links
// - file row order is preserved in the returned Vec
//
// Loader failures (missing file, unknown extension, missing column or
// sheet) are fatal to the program, unlike per-link failures downstream.
// =============================================================================

use anyhow::{anyhow, bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::PathBuf;

// Identifies where the links live: which file, which sheet, which column
//
// Built once from the CLI arguments and passed in explicitly - no
// process-wide configuration state.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Path to the .xlsx or .csv input file
    pub path: PathBuf,
    /// Worksheet name; None means the first sheet (XLSX only)
    pub sheet: Option<String>,
    /// Header name of the column holding the links
    pub column: String,
}

// Loads the configured column as an ordered list of raw link strings
pub fn load_links(config: &SourceConfig) -> Result<Vec<String>> {
    let extension = config
        .path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("xlsx") => load_from_workbook(config),
        Some("csv") => load_from_csv(config),
        _ => bail!(
            "unsupported file type '{}': please use a CSV or XLSX file",
            config.path.display()
        ),
    }
}

fn load_from_workbook(config: &SourceConfig) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(&config.path)
        .with_context(|| format!("failed to open workbook '{}'", config.path.display()))?;

    // Default to the first sheet when none was named
    let sheet_name = match &config.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("workbook '{}' has no sheets", config.path.display()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|error| anyhow!("failed to read sheet '{}': {}", sheet_name, error))?;

    let mut rows = range.rows();

    // First row is the header row; locate our column in it
    let header_row = rows
        .next()
        .ok_or_else(|| anyhow!("sheet '{}' is empty", sheet_name))?;
    let column_index = header_row
        .iter()
        .position(|cell| cell.to_string().trim() == config.column)
        .ok_or_else(|| anyhow!("column '{}' not found in sheet '{}'", config.column, sheet_name))?;

    let mut links = Vec::new();
    for row in rows {
        match row.get(column_index) {
            // Spreadsheets pad short rows with Empty; both cases mean
            // "no link in this row"
            None | Some(Data::Empty) => {}
            Some(cell) => {
                let value = cell.to_string();
                let value = value.trim();
                if !value.is_empty() {
                    links.push(value.to_string());
                }
            }
        }
    }

    Ok(links)
}

fn load_from_csv(config: &SourceConfig) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(&config.path)
        .with_context(|| format!("failed to open CSV '{}'", config.path.display()))?;

    let headers = reader.headers()?.clone();
    let column_index = headers
        .iter()
        .position(|header| header.trim() == config.column)
        .ok_or_else(|| {
            anyhow!(
                "column '{}' not found in '{}'",
                config.column,
                config.path.display()
            )
        })?;

    let mut links = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(column_index) {
            let value = value.trim();
            if !value.is_empty() {
                links.push(value.to_string());
            }
        }
    }

    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_column_in_row_order() {
        let (_dir, path) = write_csv(
            "Name,Website\n\
             first,https://a.example.com\n\
             second,http://b.example.com/x?igshid=1\n\
             third,https://c.example.com\n",
        );
        let config = SourceConfig {
            path,
            sheet: None,
            column: "Website".to_string(),
        };

        let links = load_links(&config).unwrap();
        assert_eq!(
            links,
            vec![
                "https://a.example.com",
                "http://b.example.com/x?igshid=1",
                "https://c.example.com",
            ]
        );
    }

    #[test]
    fn skips_empty_cells() {
        let (_dir, path) = write_csv("Website\nhttps://a.example.com\n\n  \nhttps://b.example.com\n");
        let config = SourceConfig {
            path,
            sheet: None,
            column: "Website".to_string(),
        };

        let links = load_links(&config).unwrap();
        assert_eq!(links, vec!["https://a.example.com", "https://b.example.com"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let (_dir, path) = write_csv("Name,Website\nx,https://a.example.com\n");
        let config = SourceConfig {
            path,
            sheet: None,
            column: "Homepage".to_string(),
        };

        let error = load_links(&config).unwrap_err();
        assert!(error.to_string().contains("Homepage"));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.txt");
        std::fs::write(&path, "whatever").unwrap();
        let config = SourceConfig {
            path,
            sheet: None,
            column: "Website".to_string(),
        };

        let error = load_links(&config).unwrap_err();
        assert!(error.to_string().contains("unsupported file type"));
    }
}
