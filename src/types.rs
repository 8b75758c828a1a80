//! Shared types for the crop pipeline.
//!
//! One [`CropSpec`] is authored by the user and applied to every entry in the
//! catalog. Everything else here is the geometry context needed to map that
//! one spec into each image's native pixel space: the preview cell it is
//! edited against, and the on-screen size it is displayed at.

use serde::{Deserialize, Serialize};

/// An axis-aligned crop rectangle: top-left offset plus size.
///
/// The units depend on the enclosing [`CropSpec`] variant: native-image
/// pixels under `OriginalScale`, preview-cell pixels under `PreviewScale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The shared crop rectangle, tagged with the coordinate space its values
/// are expressed in.
///
/// Switching spaces keeps the stored numbers and changes only the tag: a
/// 50×50 rectangle authored in native units stays a 50×50 rectangle when
/// re-tagged as preview units. Callers that want equivalent on-screen
/// geometry across a switch must convert the values themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "space", content = "rect", rename_all = "snake_case")]
pub enum CropSpec {
    /// Values are native-image pixels, shrunk per entry for display.
    OriginalScale(CropRect),
    /// Values are preview-cell pixels, enlarged per entry at crop time.
    PreviewScale(CropRect),
}

impl CropSpec {
    /// The stored rectangle, unit-agnostic.
    pub fn rect(&self) -> CropRect {
        match *self {
            CropSpec::OriginalScale(rect) | CropSpec::PreviewScale(rect) => rect,
        }
    }

    pub fn is_original_scale(&self) -> bool {
        matches!(self, CropSpec::OriginalScale(_))
    }

    /// Re-tag the stored values as native-pixel units without rescaling them.
    pub fn into_original_scale(self) -> Self {
        CropSpec::OriginalScale(self.rect())
    }

    /// Re-tag the stored values as preview-pixel units without rescaling them.
    pub fn into_preview_scale(self) -> Self {
        CropSpec::PreviewScale(self.rect())
    }

    /// Move the rectangle's top-left offset, in this spec's own units.
    ///
    /// The one shared rectangle moves for every entry at once; there are no
    /// per-entry rectangles to update.
    pub fn reposition(&mut self, x: u32, y: u32) {
        match self {
            CropSpec::OriginalScale(rect) | CropSpec::PreviewScale(rect) => {
                rect.x = x;
                rect.y = y;
            }
        }
    }
}

impl Default for CropSpec {
    /// Startup crop: 50×50 at the origin, in native units.
    fn default() -> Self {
        CropSpec::OriginalScale(CropRect::new(0, 0, 50, 50))
    }
}

/// The fixed footprint every preview occupies, and the reference frame for
/// `PreviewScale` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSpec {
    pub cell_width: u32,
    pub cell_height: u32,
}

impl PreviewSpec {
    pub fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl Default for PreviewSpec {
    /// Startup cell: 100×100.
    fn default() -> Self {
        Self::new(100, 100)
    }
}

/// On-screen rendered size of an image, in layout units.
///
/// External layout may stretch an image past its preview cell, so this is
/// always supplied by the caller and never assumed equal to [`PreviewSpec`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl From<PreviewSpec> for DisplaySize {
    /// The common case: the image is rendered exactly at its cell size.
    fn from(preview: PreviewSpec) -> Self {
        Self::new(f64::from(preview.cell_width), f64::from(preview.cell_height))
    }
}

/// Bounds of the container the crop rectangle is dragged within.
///
/// Only a live UI has one; headless callers pass `None` and the container
/// rules are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_50_square_at_origin_in_native_units() {
        let spec = CropSpec::default();
        assert!(spec.is_original_scale());
        assert_eq!(spec.rect(), CropRect::new(0, 0, 50, 50));
    }

    #[test]
    fn default_preview_cell_is_100_square() {
        assert_eq!(PreviewSpec::default(), PreviewSpec::new(100, 100));
    }

    #[test]
    fn retagging_preserves_the_stored_values() {
        let spec = CropSpec::OriginalScale(CropRect::new(10, 20, 50, 60));
        let retagged = spec.into_preview_scale();
        assert!(!retagged.is_original_scale());
        assert_eq!(retagged.rect(), spec.rect());
        assert_eq!(retagged.into_original_scale(), spec);
    }

    #[test]
    fn reposition_moves_only_the_offset() {
        let mut spec = CropSpec::PreviewScale(CropRect::new(0, 0, 30, 40));
        spec.reposition(5, 7);
        assert_eq!(spec.rect(), CropRect::new(5, 7, 30, 40));
        assert!(!spec.is_original_scale());
    }

    #[test]
    fn spec_serializes_with_a_space_tag() {
        let spec = CropSpec::OriginalScale(CropRect::new(1, 2, 3, 4));
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["space"], "original_scale");
        assert_eq!(json["rect"]["width"], 3);
    }

    #[test]
    fn display_size_from_preview_matches_the_cell() {
        let display = DisplaySize::from(PreviewSpec::new(120, 80));
        assert_eq!(display, DisplaySize::new(120.0, 80.0));
    }
}
