//! Input directory scanning and catalog construction.
//!
//! Stage 1 of the batchcrop pipeline. Enumerates the supported images in a
//! dataset directory and loads, per file, the native dimensions plus a small
//! aspect-fit preview. The catalog is what every later stage works from:
//! selection flips flags on its entries, and the executor crops the files
//! it lists.
//!
//! ## Dataset Layout
//!
//! The dataset is flat — only the top level of the input directory is
//! scanned:
//!
//! ```text
//! shoot-0412/
//! ├── 001.jpg          # catalog entry
//! ├── 002.JPG          # catalog entry (extension match is case-insensitive)
//! ├── portrait.png     # catalog entry
//! ├── notes.txt        # skipped, unsupported extension
//! ├── animation.gif    # skipped, unsupported extension
//! └── raw/             # skipped, directories are never descended into
//!     └── 001.nef
//! ```
//!
//! ## Loading
//!
//! Each file is decoded once at full resolution: the decode yields the
//! native dimensions and the preview buffer, then is dropped. The catalog
//! never retains full-resolution pixels; the executor re-decodes at crop
//! time. Files that fail to decode are recorded in
//! [`Catalog::load_failures`] and never abort the build.
//!
//! Loading fans out across the rayon pool. Entry order is the sorted path
//! order, regardless of which worker finishes first.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use image::DynamicImage;
use image::imageops::FilterType;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::geometry;
use crate::imaging::{Dimensions, ImageBackend, RustBackend};
use crate::naming::is_supported_image;
use crate::types::{CropSpec, PreviewSpec};
use crate::validate;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Input directory not found: {0}")]
    DirectoryNotFound(PathBuf),
}

/// Progress events emitted during catalog construction, one per file.
#[derive(Debug, Clone)]
pub enum CatalogEvent {
    EntryLoaded {
        path: PathBuf,
        native: Dimensions,
        eligible: bool,
    },
    EntryFailed {
        path: PathBuf,
        reason: String,
    },
}

/// One image in the dataset.
///
/// `source_path` is the entry's identity; nothing else about the source is
/// retained beyond its dimensions and the preview buffer. `eligible` says
/// whether the current crop rectangle fits this image, and `selected` is
/// user intent — forced off and locked while the entry is ineligible.
#[derive(Debug)]
pub struct CatalogEntry {
    pub source_path: PathBuf,
    pub native: Dimensions,
    pub preview: DynamicImage,
    pub eligible: bool,
    pub selected: bool,
}

impl CatalogEntry {
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// A file the catalog could not load, kept alongside the entries that did.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// All loadable images in the input directory, in sorted path order.
#[derive(Debug, Default)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub load_failures: Vec<LoadFailure>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializable projection of this catalog, written by `scan --manifest`.
    pub fn manifest(&self) -> CatalogManifest {
        CatalogManifest {
            entries: self
                .entries
                .iter()
                .map(|e| EntryRecord {
                    path: e.source_path.clone(),
                    width: e.native.width,
                    height: e.native.height,
                    preview_width: e.preview.width(),
                    preview_height: e.preview.height(),
                    eligible: e.eligible,
                    selected: e.selected,
                })
                .collect(),
            load_failures: self.load_failures.clone(),
        }
    }
}

/// Manifest output from the scan stage
#[derive(Debug, Serialize)]
pub struct CatalogManifest {
    pub entries: Vec<EntryRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_failures: Vec<LoadFailure>,
}

#[derive(Debug, Serialize)]
pub struct EntryRecord {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub preview_width: u32,
    pub preview_height: u32,
    pub eligible: bool,
    pub selected: bool,
}

/// Build a catalog with the production backend and no progress events.
pub fn build(
    input_dir: &Path,
    spec: CropSpec,
    preview: PreviewSpec,
) -> Result<Catalog, CatalogError> {
    build_with_backend(&RustBackend::new(), input_dir, spec, preview, None)
}

/// Build a catalog over every supported image in `input_dir`.
///
/// Fails fast when the directory is missing; an empty directory builds an
/// empty catalog (callers decide whether that is an error). Eligibility and
/// the initial selection are computed against `spec` during the build.
pub fn build_with_backend(
    backend: &impl ImageBackend,
    input_dir: &Path,
    spec: CropSpec,
    preview: PreviewSpec,
    events: Option<mpsc::Sender<CatalogEvent>>,
) -> Result<Catalog, CatalogError> {
    let files = collect_files(input_dir)?;

    let results: Vec<Result<CatalogEntry, LoadFailure>> = files
        .par_iter()
        .map(|path| load_entry(backend, path, spec, preview, events.as_ref()))
        .collect();

    let mut entries = Vec::new();
    let mut load_failures = Vec::new();
    for result in results {
        match result {
            Ok(entry) => entries.push(entry),
            Err(failure) => load_failures.push(failure),
        }
    }

    Ok(Catalog {
        entries,
        load_failures,
    })
}

fn load_entry(
    backend: &impl ImageBackend,
    path: &Path,
    spec: CropSpec,
    preview: PreviewSpec,
    events: Option<&mpsc::Sender<CatalogEvent>>,
) -> Result<CatalogEntry, LoadFailure> {
    let decoded = match backend.decode(path) {
        Ok(img) => img,
        Err(err) => {
            let reason = err.to_string();
            if let Some(tx) = events {
                let _ = tx.send(CatalogEvent::EntryFailed {
                    path: path.to_path_buf(),
                    reason: reason.clone(),
                });
            }
            return Err(LoadFailure {
                path: path.to_path_buf(),
                reason,
            });
        }
    };

    let native = Dimensions {
        width: decoded.width(),
        height: decoded.height(),
    };
    let fitted = geometry::aspect_fit(native, preview);
    // Triangle filter: previews are display-only
    let preview_img = decoded.resize_exact(fitted.width, fitted.height, FilterType::Triangle);
    let eligible = validate::entry_fits(spec, preview, native);

    if let Some(tx) = events {
        let _ = tx.send(CatalogEvent::EntryLoaded {
            path: path.to_path_buf(),
            native,
            eligible,
        });
    }

    Ok(CatalogEntry {
        source_path: path.to_path_buf(),
        native,
        preview: preview_img,
        eligible,
        selected: eligible,
    })
}

/// Top-level supported files in `input_dir`, sorted by path.
fn collect_files(input_dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    if input_dir.as_os_str().is_empty() || !input_dir.is_dir() {
        return Err(CatalogError::DirectoryNotFound(input_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_supported_image(p))
        .collect();

    files.sort();
    Ok(files)
}

// =========================================================================
// Probing (check subcommand)
// =========================================================================

/// Identify-only eligibility report, produced without any full decodes.
#[derive(Debug)]
pub struct ProbeReport {
    pub records: Vec<ProbeRecord>,
    pub failures: Vec<LoadFailure>,
}

#[derive(Debug, Clone)]
pub struct ProbeRecord {
    pub path: PathBuf,
    pub native: Dimensions,
    pub eligible: bool,
}

/// Probe with the production backend.
pub fn probe(
    input_dir: &Path,
    spec: CropSpec,
    preview: PreviewSpec,
) -> Result<ProbeReport, CatalogError> {
    probe_with_backend(&RustBackend::new(), input_dir, spec, preview)
}

/// Report each supported file's dimensions and eligibility by reading
/// headers only. Unreadable files land in `failures`.
pub fn probe_with_backend(
    backend: &impl ImageBackend,
    input_dir: &Path,
    spec: CropSpec,
    preview: PreviewSpec,
) -> Result<ProbeReport, CatalogError> {
    let files = collect_files(input_dir)?;

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for path in files {
        match backend.identify(&path) {
            Ok(native) => records.push(ProbeRecord {
                path,
                native,
                eligible: validate::entry_fits(spec, preview, native),
            }),
            Err(err) => failures.push(LoadFailure {
                path,
                reason: err.to_string(),
            }),
        }
    }

    Ok(ProbeReport { records, failures })
}
