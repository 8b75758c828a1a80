//! Pure geometry for mapping the crop rectangle between spaces.
//!
//! All functions here are pure and testable without any I/O or images.
//! Two different scale computations live side by side and must not be
//! folded together:
//!
//! - [`preview_scale_factor`] is **max-based**: how much the display layer
//!   shrinks native-unit values to fit the cell along the dominant axis.
//! - [`aspect_fit`] is **min-based**: the largest size at which the whole
//!   image fits inside the cell. It sizes preview buffers and the
//!   `PreviewScale` eligibility bounds.

use crate::imaging::Dimensions;
use crate::types::{CropSpec, DisplaySize, PreviewSpec};

/// The crop rectangle mapped into one entry's native pixel space.
///
/// Derived and ephemeral: recomputed from the current [`CropSpec`] and the
/// entry's geometry every time it is needed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl std::fmt::Display for MappedRect {
    /// Geometry syntax: `WIDTHxHEIGHT+X+Y`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// The crop rectangle projected into preview space for display, in layout
/// units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PreviewRect {
    /// The placeholder shown for an ineligible entry: the whole cell, at
    /// the origin, instead of a positioned rectangle.
    pub fn full_cell(preview: PreviewSpec) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: f64::from(preview.cell_width),
            height: f64::from(preview.cell_height),
        }
    }
}

/// How much larger a native image is than its preview cell, along the
/// dominant axis.
///
/// This is the factor the display layer divides by to shrink native-unit
/// crop values into the cell. Cell dimensions are validated nonzero
/// upstream; images smaller than the cell yield a factor below 1.
///
/// # Arguments
/// * `native` - Native image dimensions
/// * `preview` - Preview cell dimensions
///
/// # Examples
/// ```
/// # use batchcrop::geometry::preview_scale_factor;
/// # use batchcrop::imaging::Dimensions;
/// # use batchcrop::types::PreviewSpec;
/// // 400x200 against a 100x100 cell: width dominates at 4x
/// let factor = preview_scale_factor(
///     Dimensions { width: 400, height: 200 },
///     PreviewSpec::new(100, 100),
/// );
/// assert_eq!(factor, 4.0);
/// ```
pub fn preview_scale_factor(native: Dimensions, preview: PreviewSpec) -> f64 {
    let by_width = f64::from(native.width) / f64::from(preview.cell_width);
    let by_height = f64::from(native.height) / f64::from(preview.cell_height);
    by_width.max(by_height)
}

/// The largest dimensions at which a native image fits inside the preview
/// cell with its aspect ratio preserved.
///
/// Images smaller than the cell keep their native size; previews are never
/// upscaled. Fractional pixels are dropped, with a floor of 1 per axis.
///
/// # Arguments
/// * `native` - Native image dimensions
/// * `preview` - Preview cell dimensions
///
/// # Examples
/// ```
/// # use batchcrop::geometry::aspect_fit;
/// # use batchcrop::imaging::Dimensions;
/// # use batchcrop::types::PreviewSpec;
/// // 400x200 into a 100x100 cell → 100x50
/// assert_eq!(
///     aspect_fit(Dimensions { width: 400, height: 200 }, PreviewSpec::new(100, 100)),
///     Dimensions { width: 100, height: 50 },
/// );
/// ```
pub fn aspect_fit(native: Dimensions, preview: PreviewSpec) -> Dimensions {
    let by_width = f64::from(preview.cell_width) / f64::from(native.width);
    let by_height = f64::from(preview.cell_height) / f64::from(native.height);
    let scale = by_width.min(by_height).min(1.0);

    Dimensions {
        width: ((f64::from(native.width) * scale) as u32).max(1),
        height: ((f64::from(native.height) * scale) as u32).max(1),
    }
}

/// Map the shared crop rectangle into one entry's native pixel space.
///
/// `OriginalScale` values are already native units and pass through
/// unchanged. `PreviewScale` values are scaled up by the ratio between the
/// native size and the size the image is actually rendered at, which the
/// caller supplies (layout may stretch an image past its cell). Fractional
/// pixels are dropped.
///
/// # Arguments
/// * `spec` - The shared crop rectangle
/// * `native` - This entry's native dimensions
/// * `display` - The size this entry is rendered at on screen
pub fn to_native_rect(spec: CropSpec, native: Dimensions, display: DisplaySize) -> MappedRect {
    let rect = spec.rect();
    match spec {
        CropSpec::OriginalScale(_) => MappedRect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        },
        CropSpec::PreviewScale(_) => {
            let scale_x = f64::from(native.width) / display.width;
            let scale_y = f64::from(native.height) / display.height;
            MappedRect {
                x: (f64::from(rect.x) * scale_x) as u32,
                y: (f64::from(rect.y) * scale_y) as u32,
                width: (f64::from(rect.width) * scale_x) as u32,
                height: (f64::from(rect.height) * scale_y) as u32,
            }
        }
    }
}

/// Project the shared crop rectangle into preview space for display.
///
/// `PreviewScale` values are already preview units and pass through.
/// `OriginalScale` values shrink by [`preview_scale_factor`], so the one
/// rectangle lands at a proportionally identical position in every cell.
pub fn to_preview_rect(spec: CropSpec, native: Dimensions, preview: PreviewSpec) -> PreviewRect {
    let rect = spec.rect();
    match spec {
        CropSpec::PreviewScale(_) => PreviewRect {
            x: f64::from(rect.x),
            y: f64::from(rect.y),
            width: f64::from(rect.width),
            height: f64::from(rect.height),
        },
        CropSpec::OriginalScale(_) => {
            let factor = preview_scale_factor(native, preview);
            PreviewRect {
                x: f64::from(rect.x) / factor,
                y: f64::from(rect.y) / factor,
                width: f64::from(rect.width) / factor,
                height: f64::from(rect.height) / factor,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CropRect;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    // =========================================================================
    // preview_scale_factor tests
    // =========================================================================

    #[test]
    fn scale_factor_uses_the_dominant_axis() {
        // 400x200 in a 100x100 cell: 4.0 by width, 2.0 by height → 4.0
        let factor = preview_scale_factor(dims(400, 200), PreviewSpec::new(100, 100));
        assert_eq!(factor, 4.0);
    }

    #[test]
    fn scale_factor_portrait_dominant_axis() {
        // 200x400 in a 100x100 cell: height dominates → 4.0
        let factor = preview_scale_factor(dims(200, 400), PreviewSpec::new(100, 100));
        assert_eq!(factor, 4.0);
    }

    #[test]
    fn scale_factor_below_one_for_small_images() {
        // 50x50 in a 100x100 cell shrinks nothing; the factor reflects it
        let factor = preview_scale_factor(dims(50, 50), PreviewSpec::new(100, 100));
        assert_eq!(factor, 0.5);
    }

    #[test]
    fn scale_factor_respects_non_square_cells() {
        // 400x200 in a 200x50 cell: 2.0 by width, 4.0 by height → 4.0
        let factor = preview_scale_factor(dims(400, 200), PreviewSpec::new(200, 50));
        assert_eq!(factor, 4.0);
    }

    // =========================================================================
    // aspect_fit tests
    // =========================================================================

    #[test]
    fn fit_landscape_touches_cell_width() {
        assert_eq!(aspect_fit(dims(400, 200), PreviewSpec::new(100, 100)), dims(100, 50));
    }

    #[test]
    fn fit_portrait_touches_cell_height() {
        assert_eq!(aspect_fit(dims(200, 400), PreviewSpec::new(100, 100)), dims(50, 100));
    }

    #[test]
    fn fit_never_upscales_small_images() {
        // 40x40 stays 40x40 in a 100x100 cell
        assert_eq!(aspect_fit(dims(40, 40), PreviewSpec::new(100, 100)), dims(40, 40));
    }

    #[test]
    fn fit_drops_fractional_pixels() {
        // scale is 1/3, which is not exact in binary: 300 * 0.333... → 99
        assert_eq!(aspect_fit(dims(300, 300), PreviewSpec::new(100, 100)), dims(99, 99));
    }

    #[test]
    fn fit_extreme_strip_keeps_at_least_one_pixel() {
        // 1000x1 at scale 0.1 would round height to zero; floor is 1
        assert_eq!(aspect_fit(dims(1000, 1), PreviewSpec::new(100, 100)), dims(100, 1));
    }

    // =========================================================================
    // to_native_rect tests
    // =========================================================================

    #[test]
    fn original_scale_values_pass_through_unchanged() {
        let spec = CropSpec::OriginalScale(CropRect::new(10, 20, 300, 150));
        let mapped = to_native_rect(spec, dims(4000, 3000), DisplaySize::new(100.0, 100.0));
        assert_eq!(
            mapped,
            MappedRect {
                x: 10,
                y: 20,
                width: 300,
                height: 150
            }
        );
    }

    #[test]
    fn preview_scale_values_scale_by_displayed_size() {
        // 400x200 native shown at 100x100: x scales by 4, y by 2
        let spec = CropSpec::PreviewScale(CropRect::new(10, 10, 50, 50));
        let mapped = to_native_rect(spec, dims(400, 200), DisplaySize::new(100.0, 100.0));
        assert_eq!(
            mapped,
            MappedRect {
                x: 40,
                y: 20,
                width: 200,
                height: 100
            }
        );
    }

    #[test]
    fn preview_scale_uses_the_rendered_size_not_the_cell() {
        // Same spec, image stretched to 200x200 on screen: factors halve
        let spec = CropSpec::PreviewScale(CropRect::new(10, 10, 50, 50));
        let mapped = to_native_rect(spec, dims(400, 200), DisplaySize::new(200.0, 200.0));
        assert_eq!(
            mapped,
            MappedRect {
                x: 20,
                y: 10,
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn preview_scale_truncates_fractional_pixels() {
        // 150/100 = 1.5: 25 * 1.5 = 37.5 → 37
        let spec = CropSpec::PreviewScale(CropRect::new(0, 0, 25, 25));
        let mapped = to_native_rect(spec, dims(150, 150), DisplaySize::new(100.0, 100.0));
        assert_eq!(mapped.width, 37);
        assert_eq!(mapped.height, 37);
    }

    // =========================================================================
    // to_preview_rect tests
    // =========================================================================

    #[test]
    fn original_scale_projects_by_the_shrink_factor() {
        // Factor for 400x200 in a 100x100 cell is 4
        let spec = CropSpec::OriginalScale(CropRect::new(40, 20, 100, 60));
        let shown = to_preview_rect(spec, dims(400, 200), PreviewSpec::new(100, 100));
        assert_eq!(
            shown,
            PreviewRect {
                x: 10.0,
                y: 5.0,
                width: 25.0,
                height: 15.0
            }
        );
    }

    #[test]
    fn preview_scale_projects_as_is() {
        let spec = CropSpec::PreviewScale(CropRect::new(5, 6, 70, 80));
        let shown = to_preview_rect(spec, dims(4000, 3000), PreviewSpec::new(100, 100));
        assert_eq!(
            shown,
            PreviewRect {
                x: 5.0,
                y: 6.0,
                width: 70.0,
                height: 80.0
            }
        );
    }

    #[test]
    fn full_cell_placeholder_covers_the_cell() {
        let placeholder = PreviewRect::full_cell(PreviewSpec::new(120, 90));
        assert_eq!(
            placeholder,
            PreviewRect {
                x: 0.0,
                y: 0.0,
                width: 120.0,
                height: 90.0
            }
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
