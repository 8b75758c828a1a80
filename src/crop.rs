//! Batch crop execution.
//!
//! Stage 2 of the batchcrop pipeline. Takes the catalog entries, maps the
//! shared crop rectangle into each selected entry's native pixel space,
//! crops, re-encodes in the source's format, and writes
//! `<stem>-cropped<ext>` files into the output directory.
//!
//! ## Failure Model
//!
//! Two conditions fail the whole batch before any file is touched: a
//! missing output directory and an empty entry set. Everything after that
//! is isolated per entry — a decode error, an out-of-bounds rectangle, or
//! a failed write is recorded in the [`BatchReport`] and the batch moves
//! on. There is no rollback; partial output after partial failure is
//! expected, and same-named files from an earlier run are overwritten.
//!
//! ## What Gets Cropped
//!
//! Only entries that are both selected and still eligible under the
//! current rectangle. Eligibility is re-checked here, so forcing
//! `selected` on an ineligible entry produces no output. The source is
//! re-decoded at full resolution (previews are never cropped) and the
//! native rect is derived fresh, never reused from an earlier mapping.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::CatalogEntry;
use crate::geometry::{self, MappedRect};
use crate::imaging::{BackendError, Dimensions, ImageBackend, OutputFormat, RustBackend};
use crate::naming::{cropped_file_name, resolve_output_dir};
use crate::types::{CropSpec, DisplaySize, PreviewSpec};
use crate::validate;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Output directory not found: {0}")]
    OutputDirNotFound(PathBuf),
    #[error("No images to crop")]
    EmptyCatalog,
}

/// Failure modes of a single entry. Never aborts the batch.
#[derive(Error, Debug)]
enum EntryError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Crop {0} exceeds source bounds {1}")]
    OutOfBounds(MappedRect, Dimensions),
    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),
}

/// Progress events emitted during a batch run, one per attempted entry.
#[derive(Debug, Clone)]
pub enum CropEvent {
    EntryCropped {
        path: PathBuf,
        output: PathBuf,
        rect: MappedRect,
    },
    EntryFailed {
        path: PathBuf,
        reason: String,
    },
}

/// One entry the batch could not crop.
#[derive(Debug, Clone, Serialize)]
pub struct EntryFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Serialize)]
pub struct BatchReport {
    pub cropped: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<EntryFailure>,
}

enum EntryOutcome {
    Cropped,
    Skipped,
    Failed(EntryFailure),
}

/// Run a batch with the production backend and no progress events.
pub fn run(
    entries: &[CatalogEntry],
    spec: CropSpec,
    preview: PreviewSpec,
    display: DisplaySize,
    output_dir: &Path,
) -> Result<BatchReport, BatchError> {
    run_with_backend(
        &RustBackend::new(),
        entries,
        spec,
        preview,
        display,
        output_dir,
        None,
    )
}

/// Crop every selected, still-eligible entry into `output_dir`.
///
/// When `output_dir` names a file-like location (an existing file, or a
/// nonexistent path with an extension), its containing directory is used
/// instead. Entries fan out across the rayon pool; the report collects
/// results in entry order.
pub fn run_with_backend(
    backend: &impl ImageBackend,
    entries: &[CatalogEntry],
    spec: CropSpec,
    preview: PreviewSpec,
    display: DisplaySize,
    output_dir: &Path,
    events: Option<mpsc::Sender<CropEvent>>,
) -> Result<BatchReport, BatchError> {
    let output_dir = resolve_output_dir(output_dir);
    if !output_dir.is_dir() {
        return Err(BatchError::OutputDirNotFound(output_dir));
    }
    if entries.is_empty() {
        return Err(BatchError::EmptyCatalog);
    }

    let outcomes: Vec<EntryOutcome> = entries
        .par_iter()
        .map(|entry| {
            if !entry.selected || !validate::entry_fits(spec, preview, entry.native) {
                return EntryOutcome::Skipped;
            }
            crop_entry(backend, entry, spec, display, &output_dir, events.as_ref())
        })
        .collect();

    let mut cropped = 0;
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            EntryOutcome::Cropped => cropped += 1,
            EntryOutcome::Skipped => {}
            EntryOutcome::Failed(failure) => failures.push(failure),
        }
    }

    Ok(BatchReport { cropped, failures })
}

fn crop_entry(
    backend: &impl ImageBackend,
    entry: &CatalogEntry,
    spec: CropSpec,
    display: DisplaySize,
    output_dir: &Path,
    events: Option<&mpsc::Sender<CropEvent>>,
) -> EntryOutcome {
    match try_crop_entry(backend, entry, spec, display, output_dir) {
        Ok((output, rect)) => {
            if let Some(tx) = events {
                let _ = tx.send(CropEvent::EntryCropped {
                    path: entry.source_path.clone(),
                    output,
                    rect,
                });
            }
            EntryOutcome::Cropped
        }
        Err(err) => {
            let reason = err.to_string();
            if let Some(tx) = events {
                let _ = tx.send(CropEvent::EntryFailed {
                    path: entry.source_path.clone(),
                    reason: reason.clone(),
                });
            }
            EntryOutcome::Failed(EntryFailure {
                path: entry.source_path.clone(),
                reason,
            })
        }
    }
}

fn try_crop_entry(
    backend: &impl ImageBackend,
    entry: &CatalogEntry,
    spec: CropSpec,
    display: DisplaySize,
    output_dir: &Path,
) -> Result<(PathBuf, MappedRect), EntryError> {
    // Previews are never cropped; the source is re-decoded in full.
    let image = backend.decode(&entry.source_path)?;

    // Bounds are taken from the decoded image, not the catalog snapshot,
    // in case the file changed on disk since the build.
    let native = Dimensions {
        width: image.width(),
        height: image.height(),
    };
    let rect = geometry::to_native_rect(spec, native, display);
    if !validate::mapped_rect_fits(rect, native) {
        return Err(EntryError::OutOfBounds(rect, native));
    }

    let cropped = image.crop_imm(rect.x, rect.y, rect.width, rect.height);
    let format = OutputFormat::from_source_path(&entry.source_path);
    let bytes = backend.encode(&cropped, format)?;

    let output = output_dir.join(cropped_file_name(&entry.source_path));
    std::fs::write(&output, &bytes).map_err(|e| EntryError::Write(output.clone(), e))?;

    Ok((output, rect))
}
