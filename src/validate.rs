//! Ordered constraint checking for crop parameters.
//!
//! Validation runs the same fixed rule sequence every time, so a spec that
//! breaks several rules always reports them in the same order and the
//! surfaced error (the first) is stable. `OriginalScale` values are native
//! units with no relationship to the preview cell, so every cell-relative
//! rule is vacuous in that space and only the size, offset, and cell
//! sanity rules apply.
//!
//! Per-entry checks live here too: [`entry_fits`] decides whether the
//! shared rectangle can apply to one image at all, and
//! [`mapped_rect_fits`] is the executor's final guard before pixels are
//! touched.

use thiserror::Error;

use crate::geometry::{self, MappedRect};
use crate::imaging::Dimensions;
use crate::types::{ContainerSize, CropSpec, PreviewSpec};

/// One violated crop constraint, in the fixed reporting order.
///
/// The offset rules can never fire with unsigned storage; they keep their
/// place so renderers and future signed callers agree on rule positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Crop height must be greater than zero")]
    HeightNotPositive,
    #[error("Crop width must be greater than zero")]
    WidthNotPositive,
    #[error("Crop X offset cannot be negative")]
    XNegative,
    #[error("Crop Y offset cannot be negative")]
    YNegative,
    #[error("Crop rectangle extends past the right edge of the preview cell")]
    RightEdgePastCell,
    #[error("Crop rectangle extends past the bottom edge of the preview cell")]
    BottomEdgePastCell,
    #[error("Preview cell height must be greater than zero")]
    CellHeightNotPositive,
    #[error("Preview cell width must be greater than zero")]
    CellWidthNotPositive,
    #[error("Crop width exceeds the drag container")]
    WidthPastContainer,
    #[error("Crop height exceeds the drag container")]
    HeightPastContainer,
    #[error("Crop width exceeds the preview cell width")]
    WidthPastCell,
    #[error("Crop height exceeds the preview cell height")]
    HeightPastCell,
}

/// The first violated rule, as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub Violation);

/// Evaluate every rule in order and return all violations.
///
/// An empty result means the parameters are valid. `container` is the
/// bounds of the surface the rectangle is dragged within; headless callers
/// pass `None` and the container rules are skipped.
pub fn check(
    spec: CropSpec,
    preview: PreviewSpec,
    container: Option<ContainerSize>,
) -> Vec<Violation> {
    let rect = spec.rect();
    let preview_space = !spec.is_original_scale();
    let cell_w = u64::from(preview.cell_width);
    let cell_h = u64::from(preview.cell_height);

    let mut violations = Vec::new();

    if rect.height == 0 {
        violations.push(Violation::HeightNotPositive);
    }
    if rect.width == 0 {
        violations.push(Violation::WidthNotPositive);
    }
    // Offsets are unsigned; the two negative-offset rules hold positions
    // three and four but cannot fire.
    if preview_space && u64::from(rect.x) + u64::from(rect.width) > cell_w {
        violations.push(Violation::RightEdgePastCell);
    }
    if preview_space && u64::from(rect.y) + u64::from(rect.height) > cell_h {
        violations.push(Violation::BottomEdgePastCell);
    }
    if preview.cell_height == 0 {
        violations.push(Violation::CellHeightNotPositive);
    }
    if preview.cell_width == 0 {
        violations.push(Violation::CellWidthNotPositive);
    }
    if preview_space && let Some(container) = container {
        if f64::from(rect.width) > container.width {
            violations.push(Violation::WidthPastContainer);
        }
        if f64::from(rect.height) > container.height {
            violations.push(Violation::HeightPastContainer);
        }
    }
    if preview_space && rect.width > preview.cell_width {
        violations.push(Violation::WidthPastCell);
    }
    if preview_space && rect.height > preview.cell_height {
        violations.push(Violation::HeightPastCell);
    }

    violations
}

/// Validate crop parameters, surfacing only the first violation.
pub fn validate(
    spec: CropSpec,
    preview: PreviewSpec,
    container: Option<ContainerSize>,
) -> Result<(), ValidationError> {
    match check(spec, preview, container).first() {
        Some(&first) => Err(ValidationError(first)),
        None => Ok(()),
    }
}

/// Whether the shared rectangle can apply to an image of this size.
///
/// `OriginalScale` compares native units against native bounds directly.
/// `PreviewScale` compares preview units against the aspect-fitted size
/// this image occupies inside the cell, which is smaller than the cell
/// whenever the aspect ratios differ.
pub fn entry_fits(spec: CropSpec, preview: PreviewSpec, native: Dimensions) -> bool {
    let rect = spec.rect();
    match spec {
        CropSpec::OriginalScale(_) => rect.width <= native.width && rect.height <= native.height,
        CropSpec::PreviewScale(_) => {
            let fitted = geometry::aspect_fit(native, preview);
            rect.width <= fitted.width && rect.height <= fitted.height
        }
    }
}

/// Whether a mapped rectangle lies fully inside the native image.
///
/// The executor checks this against each entry's real dimensions before
/// cropping; a rectangle that passed the shared-parameter rules can still
/// overrun one particular image.
pub fn mapped_rect_fits(rect: MappedRect, native: Dimensions) -> bool {
    u64::from(rect.x) + u64::from(rect.width) <= u64::from(native.width)
        && u64::from(rect.y) + u64::from(rect.height) <= u64::from(native.height)
}
