//! # Batchcrop
//!
//! One crop rectangle, applied to every image in a directory. Point it at a
//! flat dataset of photos, describe the rectangle once, and every image the
//! rectangle fits gets a cropped copy next to the originals' names.
//!
//! # Architecture: Scan, Then Crop
//!
//! Batchcrop works in two independent stages, with a catalog in between:
//!
//! ```text
//! 1. Scan   dataset/  →  catalog     (dimensions, previews, eligibility)
//! 2. Crop   catalog   →  cropped/    (one rectangle → every selected image)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Inspectability**: the catalog serializes to JSON (`scan --manifest`),
//!   so you can see exactly what a crop run would touch before running it.
//! - **Cheap dry runs**: `check` reads only image headers and reports
//!   per-image eligibility without decoding or writing anything.
//! - **Testability**: the crop executor is a function over catalog entries,
//!   so unit tests drive it with synthetic entries and a mock backend
//!   instead of fixture directories.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Stage 1 — walks the dataset, decodes dimensions and previews, builds the catalog |
//! | [`crop`] | Stage 2 — applies the rectangle to every selected entry and writes the copies |
//! | [`selection`] | Which catalog entries the crop stage will touch; eligibility is the ceiling |
//! | [`validate`] | Ordered parameter rules, run before any stage does work |
//! | [`geometry`] | Scale math: preview cells, display shrink factors, rect mapping |
//! | [`types`] | Shared parameter types (`CropRect`, `CropSpec`, `PreviewSpec`) |
//! | [`naming`] | Output naming convention (`photo.jpg` → `photo-cropped.jpg`) |
//! | [`imaging`] | Pure-Rust image operations behind the `ImageBackend` trait |
//! | [`output`] | CLI output formatting for catalogs, events, and batch reports |
//!
//! # Design Decisions
//!
//! ## One Rectangle, Two Scales
//!
//! The crop rectangle is authored once and tagged with the scale its numbers
//! live in: native pixels ([`types::CropSpec::OriginalScale`]) or preview-cell
//! pixels ([`types::CropSpec::PreviewScale`]). Switching scales re-tags the
//! same numbers — it never rescales them — so `50` means something different
//! in each mode and the user's values survive the switch intact. Preview-scale
//! rects are mapped into each image's native space individually, which is what
//! lets one rectangle describe a proportional crop across mixed resolutions.
//!
//! ## Validate First, Then Never Abort
//!
//! Parameters pass through an ordered rule list before any stage runs, and the
//! first violated rule is the error the user sees. After that, nothing aborts
//! the batch: an unreadable file becomes a catalog load failure, an image the
//! rectangle outgrew is skipped, and a mid-batch encode error is recorded
//! against its entry while the rest of the run continues. The batch report
//! carries the failures; the exit code does not.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate for decoding, cropping, and
//! encoding — no ImageMagick, no system libraries. Cropped copies keep their
//! source format (PNG stays PNG, BMP stays BMP, everything else is JPEG at
//! quality 90), so a dataset round-trips through the tool without format
//! surprises. The `ImageBackend` trait is the seam: production uses the
//! `image`-backed implementation, tests swap in a recording mock.
//!
//! ## Previews Are Display-Only
//!
//! The scan stage decodes each image exactly once, takes its dimensions, and
//! shrinks it into a fixed preview cell with a Triangle filter. The preview is
//! never upscaled and never cropped — the crop stage re-decodes the original
//! at full resolution and takes its bounds from the decoded file, not from the
//! catalog snapshot, in case the file changed on disk since the scan.

pub mod catalog;
pub mod crop;
pub mod geometry;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod selection;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
