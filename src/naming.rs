//! Filename rules: which files are dataset images, what a cropped copy is
//! called, and where it lands.
//!
//! Output naming is suffix-based and case-preserving: the cropped copy of
//! `IMG_0042.JPG` is `IMG_0042-cropped.JPG`. Same-named outputs from an
//! earlier run are simply overwritten.

use std::path::{Path, PathBuf};

/// Extensions accepted into the catalog, lowercase. Anything else in the
/// input directory is skipped without comment.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Whether a path names a supported image, by extension, case-insensitive.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// File name for the cropped copy of `source`: `<stem>-cropped<ext>`,
/// extension case preserved.
pub fn cropped_file_name(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    match source.extension() {
        Some(ext) => format!("{stem}-cropped.{}", ext.to_string_lossy()),
        None => format!("{stem}-cropped"),
    }
}

/// Resolve the configured output path to the directory outputs go in.
///
/// A file-like path (an existing file, or a nonexistent path whose last
/// segment has an extension) stands in for its containing directory, so
/// pointing the tool at a file inside the target directory still works.
pub fn resolve_output_dir(configured: &Path) -> PathBuf {
    let file_like =
        configured.is_file() || (!configured.is_dir() && configured.extension().is_some());
    if file_like && let Some(parent) = configured.parent() {
        // The parent of a bare file name is the current directory.
        if parent.as_os_str().is_empty() {
            return PathBuf::from(".");
        }
        return parent.to_path_buf();
    }
    configured.to_path_buf()
}
