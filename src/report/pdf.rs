// src/report/pdf.rs
// =============================================================================
// This module renders the audit results into a PDF document.
//
// We use the `printpdf` crate with its builtin Helvetica fonts, so the
// report needs no font files on disk. Pages are US letter. The layout is
// intentionally plain: a heading block, the summary counters, a tally of
// status codes, and then one line per checked link (with an indented
// detail line for redirect targets and failure causes).
//
// A small PageWriter keeps a cursor of the current vertical position and
// starts a fresh page whenever a line would fall below the bottom margin.
// =============================================================================

use anyhow::{Context, Result};
use chrono::Local;
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::checker::LinkStatus;
use crate::pipeline::LinkRecord;
use crate::report::Summary;

// US letter, in millimeters
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;

const MARGIN: f32 = 20.0;
const TOP: f32 = PAGE_HEIGHT - MARGIN;
const BOTTOM: f32 = MARGIN;
const LINE_HEIGHT: f32 = 6.0;

// Longest URL that still fits one report line in 9pt Helvetica
const MAX_URL_CHARS: usize = 88;

/// Default report location: <column>_report_<MM-DD_HH-MM>.pdf in the
/// working directory
pub fn default_report_path(column: &str) -> PathBuf {
    let stamp = Local::now().format("%m-%d_%H-%M");
    PathBuf::from(format!("{}_report_{}.pdf", column, stamp))
}

// Writes the full PDF report
//
// `column` is the audited column's header name; it appears in the title
// so a report file is self-describing.
pub fn write_pdf(
    records: &[LinkRecord],
    summary: &Summary,
    column: &str,
    path: &Path,
) -> Result<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Link Status Report for {}", column),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    // Scope the writer so its borrow of `doc` ends before doc.save()
    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(first_page).get_layer(first_layer),
            y: TOP,
        };

        let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
        writer.line(&format!("Report generated on: {}", generated), 9.0, &regular, 0.0);
        writer.space(4.0);

        writer.line(
            &format!("Link Status Report for {}", column),
            16.0,
            &bold,
            0.0,
        );
        writer.space(6.0);

        render_summary(&mut writer, summary, &regular, &bold);
        render_status_codes(&mut writer, summary, &regular, &bold);

        // Detailed listing starts on its own page, like the original report
        writer.new_page();
        writer.line("Detailed Link Status", 13.0, &bold, 0.0);
        writer.space(3.0);

        for record in records {
            render_record(&mut writer, record, &regular);
        }
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create report file '{}'", path.display()))?;
    doc.save(&mut BufWriter::new(file))
        .with_context(|| format!("failed to write PDF report to '{}'", path.display()))?;

    Ok(())
}

fn render_summary(
    writer: &mut PageWriter<'_>,
    summary: &Summary,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    writer.line("Summary", 13.0, bold, 0.0);
    writer.space(2.0);

    let rows = [
        ("Total links checked", summary.total),
        ("Working links (2xx/3xx)", summary.working()),
        ("Broken links", summary.broken()),
        ("  - client errors (4xx)", summary.client_error),
        ("  - server errors (5xx)", summary.server_error),
        ("  - unreachable", summary.unreachable),
        ("Links upgraded to https", summary.upgraded),
        ("Links with igshid parameter removed", summary.stripped),
    ];
    for (label, count) in rows {
        writer.line(&format!("{}: {}", label, count), 10.0, regular, 2.0);
    }
    writer.space(6.0);
}

fn render_status_codes(
    writer: &mut PageWriter<'_>,
    summary: &Summary,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    writer.line("Status Code Summary", 13.0, bold, 0.0);
    writer.space(2.0);

    if summary.status_codes.is_empty() && summary.unreachable == 0 {
        writer.line("(no links checked)", 10.0, regular, 2.0);
        return;
    }

    for (code, count) in &summary.status_codes {
        writer.line(&format!("HTTP {}: {}", code, count), 10.0, regular, 2.0);
    }
    if summary.unreachable > 0 {
        writer.line(
            &format!("no response: {}", summary.unreachable),
            10.0,
            regular,
            2.0,
        );
    }
    writer.space(6.0);
}

fn render_record(writer: &mut PageWriter<'_>, record: &LinkRecord, regular: &IndirectFontRef) {
    let code = match record.status_code {
        Some(code) => code.to_string(),
        None => "-".to_string(),
    };
    writer.line(
        &format!(
            "[{}] {} {}",
            status_label(record.status),
            code,
            truncate(&record.normalized_url, MAX_URL_CHARS),
        ),
        9.0,
        regular,
        0.0,
    );

    // Original form when normalization changed it, so the report maps
    // back to the source cell
    if record.original_url != record.normalized_url {
        writer.line(
            &format!("from: {}", truncate(&record.original_url, MAX_URL_CHARS)),
            8.0,
            regular,
            6.0,
        );
    }
    if let Some(detail) = &record.detail {
        writer.line(&format!("-> {}", truncate(detail, MAX_URL_CHARS)), 8.0, regular, 6.0);
    }
}

fn status_label(status: LinkStatus) -> &'static str {
    match status {
        LinkStatus::Ok => "OK",
        LinkStatus::Redirected => "REDIRECT",
        LinkStatus::ClientError => "CLIENT ERROR",
        LinkStatus::ServerError => "SERVER ERROR",
        LinkStatus::Unreachable => "UNREACHABLE",
    }
}

// Keeps long URLs from running off the right edge of the page
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars).collect();
        format!("{}...", kept)
    }
}

// Cursor over the current page: tracks the vertical position and rolls
// over to a fresh page when a line would cross the bottom margin
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, indent: f32) {
        if self.y < BOTTOM {
            self.new_page();
        }
        self.layer
            .use_text(text, size, Mm(MARGIN + indent), Mm(self.y), font);
        self.y -= LINE_HEIGHT;
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP;
    }
}
