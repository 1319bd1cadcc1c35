//! Initial crop placement and bounds clamping in display space.
//!
//! # Initial Crop
//!
//! The first selection covers 90% of the display width at the required
//! aspect ratio. When that box would be taller than the display, height
//! becomes the binding constraint and the box is refit to the full display
//! height instead. The result is centered.
//!
//! # Clamping
//!
//! The interactive selection may report intermediate values outside the
//! image while the user drags. [`clamp`] shrinks an oversized rectangle
//! (keeping its aspect ratio) and then translates it back inside the
//! display bounds.

use crate::error::CropError;
use crate::output::OutputSpec;

use super::CropRect;

/// Fraction of the display width covered by the initial selection.
pub const INITIAL_COVERAGE: f64 = 0.9;

/// Relative tolerance when comparing a caller's aspect ratio with the one
/// required by an [`OutputSpec`].
pub const ASPECT_TOLERANCE: f64 = 1e-6;

fn validate_display(display_width: f64, display_height: f64) -> Result<(), CropError> {
    if !(display_width.is_finite() && display_width > 0.0) {
        return Err(CropError::invalid_geometry(format!(
            "display width must be positive, got {}",
            display_width
        )));
    }
    if !(display_height.is_finite() && display_height > 0.0) {
        return Err(CropError::invalid_geometry(format!(
            "display height must be positive, got {}",
            display_height
        )));
    }
    Ok(())
}

/// Compute the centered initial selection for an aspect ratio.
///
/// # Arguments
///
/// * `display_width`, `display_height` - Laid-out size of the image
/// * `aspect_ratio` - Required `width / height` of the selection
///
/// # Returns
///
/// A pixel-unit `CropRect` with `width / height == aspect_ratio`, lying
/// fully inside `[0, display_width] x [0, display_height]`.
///
/// # Errors
///
/// Returns `CropError::InvalidGeometry` if a display dimension or the
/// aspect ratio is non-positive or non-finite.
pub fn initial_crop(
    display_width: f64,
    display_height: f64,
    aspect_ratio: f64,
) -> Result<CropRect, CropError> {
    validate_display(display_width, display_height)?;
    if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
        return Err(CropError::invalid_geometry(format!(
            "aspect ratio must be positive and finite, got {}",
            aspect_ratio
        )));
    }

    // Width first
    let mut width = display_width * INITIAL_COVERAGE;
    let mut height = width / aspect_ratio;

    // Too tall: fit the full height instead
    if height > display_height {
        height = display_height;
        width = height * aspect_ratio;
    }

    Ok(CropRect::pixels(
        (display_width - width) / 2.0,
        (display_height - height) / 2.0,
        width,
        height,
    ))
}

/// Compute the initial selection for an output, checking the caller's
/// aspect ratio against the one the output shape requires.
///
/// # Errors
///
/// Returns `CropError::InvalidGeometry` if `aspect_ratio` differs from
/// `output.aspect_ratio()` (e.g. a 50x75 rectangle requested with 1:1),
/// or for any of the reasons [`initial_crop`] fails.
pub fn initial_crop_for(
    display_width: f64,
    display_height: f64,
    output: &OutputSpec,
    aspect_ratio: f64,
) -> Result<CropRect, CropError> {
    let required = output.aspect_ratio();
    if !aspect_matches(aspect_ratio, required) {
        return Err(CropError::invalid_geometry(format!(
            "aspect ratio {} does not match {} output {}x{} (expected {})",
            aspect_ratio,
            output.shape.as_str(),
            output.width,
            output.height,
            required
        )));
    }
    initial_crop(display_width, display_height, required)
}

fn aspect_matches(actual: f64, required: f64) -> bool {
    actual.is_finite() && (actual - required).abs() <= ASPECT_TOLERANCE * required.max(1.0)
}

/// Bring a selection fully inside the display bounds.
///
/// Percent rectangles are converted to pixels first. Oversized rectangles
/// are scaled down uniformly so their aspect ratio survives, then moved so
/// that `x + width <= display_width` and `y + height <= display_height`.
/// A rectangle with no area keeps its (zero) size; rendering rejects it.
///
/// # Errors
///
/// Returns `CropError::InvalidGeometry` if a display dimension is
/// non-positive or the rectangle holds a non-finite value.
pub fn clamp(rect: &CropRect, display_width: f64, display_height: f64) -> Result<CropRect, CropError> {
    validate_display(display_width, display_height)?;
    let rect = rect.to_pixels(display_width, display_height);
    if !rect.is_finite() {
        return Err(CropError::invalid_geometry(format!(
            "crop rectangle must be finite, got {:?}",
            rect
        )));
    }

    let mut width = rect.width.max(0.0);
    let mut height = rect.height.max(0.0);

    if width > 0.0 && height > 0.0 {
        let factor = (display_width / width).min(display_height / height).min(1.0);
        width *= factor;
        height *= factor;
    } else {
        width = width.min(display_width);
        height = height.min(display_height);
    }

    let x = rect.x.clamp(0.0, (display_width - width).max(0.0));
    let y = rect.y.clamp(0.0, (display_height - height).max(0.0));

    Ok(CropRect::pixels(x, y, width, height))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
