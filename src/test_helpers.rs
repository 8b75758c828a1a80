//! Shared test utilities for the batchcrop test suite.
//!
//! Provides synthetic image writers for every supported format, dataset
//! fixtures on temp directories, and catalog lookups that panic with a
//! clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let dataset = setup_dataset(&[("wide.jpg", 400, 200), ("tall.png", 200, 400)]);
//! let catalog = build_catalog(dataset.path());
//!
//! let entry = find_entry(&catalog, "wide.jpg");
//! assert!(entry.eligible);
//! ```

use std::path::Path;

use image::{ImageEncoder, RgbImage};
use tempfile::TempDir;

use crate::catalog::{self, Catalog, CatalogEntry};
use crate::imaging::RustBackend;
use crate::types::{CropSpec, PreviewSpec};

// =========================================================================
// Synthetic images
// =========================================================================

/// Deterministic pixel pattern derived from position, so re-encoding the
/// same source always produces identical bytes.
fn test_pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Create a small valid JPEG file with the given dimensions.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = test_pattern(width, height);
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG file with the given dimensions.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    test_pattern(width, height).save(path).unwrap();
}

/// Create a small valid BMP file with the given dimensions.
pub fn write_test_bmp(path: &Path, width: u32, height: u32) {
    test_pattern(width, height).save(path).unwrap();
}

/// Write a test image, choosing the encoder from the path's extension.
pub fn write_test_image(path: &Path, width: u32, height: u32) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => write_test_jpeg(path, width, height),
        Some("png") => write_test_png(path, width, height),
        Some("bmp") => write_test_bmp(path, width, height),
        other => panic!("no test encoder for extension {other:?}"),
    }
}

// =========================================================================
// Dataset fixtures
// =========================================================================

/// Build a dataset directory of synthetic images. Each entry is
/// `(file name, width, height)`.
pub fn setup_dataset(files: &[(&str, u32, u32)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, width, height) in files {
        write_test_image(&tmp.path().join(name), *width, *height);
    }
    tmp
}

/// Build a catalog over a dataset directory with default crop parameters
/// and the real backend.
pub fn build_catalog(input_dir: &Path) -> Catalog {
    catalog::build_with_backend(
        &RustBackend::new(),
        input_dir,
        CropSpec::default(),
        PreviewSpec::default(),
        None,
    )
    .unwrap()
}

// =========================================================================
// Catalog lookups
// =========================================================================

/// Find a catalog entry by file name. Panics if not found.
pub fn find_entry<'a>(catalog: &'a Catalog, name: &str) -> &'a CatalogEntry {
    catalog
        .entries
        .iter()
        .find(|e| e.file_name() == name)
        .unwrap_or_else(|| {
            let names = entry_names(catalog);
            panic!("entry '{name}' not found. Available: {names:?}")
        })
}

/// All entry file names in catalog order.
pub fn entry_names(catalog: &Catalog) -> Vec<String> {
    catalog.entries.iter().map(|e| e.file_name()).collect()
}
