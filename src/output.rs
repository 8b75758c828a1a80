//! CLI output formatting for both pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every entry is its identity — positional index, file name, and pixel
//! dimensions — with filesystem paths shown as secondary context via
//! indented `Source:` lines. The inventory reads as a dataset summary while
//! still letting users trace every line back to a specific file.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Catalog
//! 001 dawn.jpg (1600x900)
//!     Source: shoot/dawn.jpg
//!     Preview: 100x56
//! 002 small.png (40x40, crop does not fit)
//!     Source: shoot/small.png
//!     Preview: 40x40
//!
//! Failures
//!     broken.jpg: Failed to decode shoot/broken.jpg: invalid JPEG
//!
//! 2 images, 1 eligible, 1 unreadable
//! ```
//!
//! ## Crop
//!
//! ```text
//!     dawn.jpg
//!         Crop: 800x450+0+0
//!         Output: cropped/dawn-cropped.jpg
//!     stormy.jpg
//!         Failed: Failed to decode shoot/stormy.jpg: truncated
//!
//! Cropped 1 images into cropped
//! 1 failed
//!     stormy.jpg: Failed to decode shoot/stormy.jpg: truncated
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects. Progress events have no
//! print wrapper; the printer thread in `main` loops over the format
//! functions directly.

use crate::catalog::{Catalog, CatalogEvent, ProbeReport};
use crate::crop::{BatchReport, CropEvent};
use crate::imaging::Dimensions;
use std::path::Path;

// ============================================================================
// Shared entry display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entry header: positional index + file name + detail.
///
/// ```text
/// 001 dawn.jpg (1600x900)
/// ```
fn entry_header(index: usize, name: &str, detail: &str) -> String {
    format!("{} {} ({})", format_index(index), name, detail)
}

/// The parenthetical dimension note, extended when the current crop cannot
/// be applied to the entry.
fn dimension_note(native: Dimensions, eligible: bool) -> String {
    if eligible {
        native.to_string()
    } else {
        format!("{native}, crop does not fit")
    }
}

/// Final path component, falling back to the whole path.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format the dataset inventory for a built catalog.
///
/// Information-first: each entry leads with its positional index, file
/// name, and native dimensions. Source path and preview size are shown as
/// indented context lines.
pub fn format_scan_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Catalog".to_string());
    for (i, entry) in catalog.entries.iter().enumerate() {
        let note = dimension_note(entry.native, entry.eligible);
        lines.push(entry_header(i + 1, &entry.file_name(), &note));
        lines.push(format!("    Source: {}", entry.source_path.display()));
        lines.push(format!(
            "    Preview: {}x{}",
            entry.preview.width(),
            entry.preview.height()
        ));
    }

    if !catalog.load_failures.is_empty() {
        lines.push(String::new());
        lines.push("Failures".to_string());
        for failure in &catalog.load_failures {
            lines.push(format!(
                "    {}: {}",
                file_name_of(&failure.path),
                failure.reason
            ));
        }
    }

    let eligible = catalog.entries.iter().filter(|e| e.eligible).count();
    lines.push(String::new());
    lines.push(format!(
        "{} images, {} eligible, {} unreadable",
        catalog.entries.len(),
        eligible,
        catalog.load_failures.len()
    ));

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(catalog: &Catalog) {
    for line in format_scan_output(catalog) {
        println!("{}", line);
    }
}

/// Format a single catalog progress event as display lines.
pub fn format_catalog_event(event: &CatalogEvent) -> Vec<String> {
    match event {
        CatalogEvent::EntryLoaded {
            path,
            native,
            eligible,
        } => {
            vec![format!(
                "{}{} ({})",
                indent(1),
                file_name_of(path),
                dimension_note(*native, *eligible)
            )]
        }
        CatalogEvent::EntryFailed { path, reason } => {
            vec![format!("{}{}: {}", indent(1), file_name_of(path), reason)]
        }
    }
}

// ============================================================================
// Check output
// ============================================================================

/// Format the header-probe eligibility report for the check subcommand.
pub fn format_probe_output(report: &ProbeReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, record) in report.records.iter().enumerate() {
        let note = dimension_note(record.native, record.eligible);
        lines.push(entry_header(i + 1, &file_name_of(&record.path), &note));
    }

    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push("Unreadable".to_string());
        for failure in &report.failures {
            lines.push(format!(
                "    {}: {}",
                file_name_of(&failure.path),
                failure.reason
            ));
        }
    }

    let eligible = report.records.iter().filter(|r| r.eligible).count();
    lines.push(String::new());
    lines.push(format!(
        "{} of {} images can take this crop",
        eligible,
        report.records.len()
    ));

    lines
}

/// Print the probe report to stdout.
pub fn print_probe_output(report: &ProbeReport) {
    for line in format_probe_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Crop output
// ============================================================================

/// Format a single crop progress event as display lines.
///
/// Events arrive in completion order, not entry order, so lines carry no
/// positional index.
pub fn format_crop_event(event: &CropEvent) -> Vec<String> {
    match event {
        CropEvent::EntryCropped { path, output, rect } => vec![
            format!("{}{}", indent(1), file_name_of(path)),
            format!("{}Crop: {}", indent(2), rect),
            format!("{}Output: {}", indent(2), output.display()),
        ],
        CropEvent::EntryFailed { path, reason } => vec![
            format!("{}{}", indent(1), file_name_of(path)),
            format!("{}Failed: {}", indent(2), reason),
        ],
    }
}

/// Format the batch summary printed after the crop stage.
pub fn format_batch_report(report: &BatchReport, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Cropped {} images into {}",
        report.cropped,
        output_dir.display()
    ));

    if !report.failures.is_empty() {
        lines.push(format!("{} failed", report.failures.len()));
        for failure in &report.failures {
            lines.push(format!(
                "    {}: {}",
                file_name_of(&failure.path),
                failure.reason
            ));
        }
    }

    lines
}

/// Print the batch summary to stdout.
pub fn print_batch_report(report: &BatchReport, output_dir: &Path) {
    for line in format_batch_report(report, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
