//! Display-space to source-space coordinate mapping.
//!
//! The interactive view lays the image out at some display size that is
//! usually smaller than its natural resolution. A committed selection is
//! recorded against that layout, so mapping it back to source pixels is a
//! per-axis multiplication:
//!
//! ```text
//! scale_x = natural_width  / display_width
//! scale_y = natural_height / display_height
//! source  = (x * scale_x, y * scale_y, width * scale_x, height * scale_y)
//! ```
//!
//! Zoom never appears here. The selection is already expressed in unzoomed
//! layout coordinates; multiplying by zoom again would crop the wrong
//! region.

use serde::{Deserialize, Serialize};

use crate::error::CropError;

use super::{CropRect, CropUnit, SourceRect};

/// Natural and laid-out size of an image.
///
/// The two axes are scaled independently; the layout may distort the
/// natural aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayLayout {
    pub natural_width: u32,
    pub natural_height: u32,
    pub display_width: f64,
    pub display_height: f64,
}

impl DisplayLayout {
    pub fn new(natural_width: u32, natural_height: u32, display_width: f64, display_height: f64) -> Self {
        Self {
            natural_width,
            natural_height,
            display_width,
            display_height,
        }
    }

    /// Layout where the image is shown at its natural size.
    pub fn natural(width: u32, height: u32) -> Self {
        Self::new(width, height, width as f64, height as f64)
    }

    /// Per-axis display-to-source scale factors `(scale_x, scale_y)`.
    ///
    /// # Errors
    ///
    /// Returns `CropError::DegenerateScale` if a display dimension is zero,
    /// negative or non-finite (e.g. the image failed to lay out).
    pub fn scale(&self) -> Result<(f64, f64), CropError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(self.display_width) || !valid(self.display_height) {
            return Err(CropError::degenerate_scale(format!(
                "display size is {}x{}",
                self.display_width, self.display_height
            )));
        }
        Ok((
            self.natural_width as f64 / self.display_width,
            self.natural_height as f64 / self.display_height,
        ))
    }

    /// Map a display-space selection (pixels or percent) to source pixels.
    pub fn map_crop(&self, rect: &CropRect) -> Result<SourceRect, CropError> {
        let (scale_x, scale_y) = self.scale()?;
        let rect = rect.to_pixels(self.display_width, self.display_height);
        to_source_space(&rect, scale_x, scale_y)
    }
}

/// Map a pixel-unit display rectangle into source pixel coordinates.
///
/// # Arguments
///
/// * `rect` - Selection in unzoomed display pixels
/// * `scale_x` - `natural_width / display_width`
/// * `scale_y` - `natural_height / display_height`
///
/// # Errors
///
/// Returns `CropError::DegenerateScale` if a scale factor is non-positive
/// or non-finite, and `CropError::InvalidGeometry` if `rect` is expressed
/// in percent (use [`DisplayLayout::map_crop`] for those).
pub fn to_source_space(rect: &CropRect, scale_x: f64, scale_y: f64) -> Result<SourceRect, CropError> {
    if !(scale_x.is_finite() && scale_x > 0.0 && scale_y.is_finite() && scale_y > 0.0) {
        return Err(CropError::degenerate_scale(format!(
            "scale factors must be positive and finite, got {}x{}",
            scale_x, scale_y
        )));
    }
    if rect.unit != CropUnit::Pixels {
        return Err(CropError::invalid_geometry(
            "percent rectangles must be converted to pixels before mapping",
        ));
    }

    Ok(SourceRect {
        x: rect.x * scale_x,
        y: rect.y * scale_y,
        width: rect.width * scale_x,
        height: rect.height * scale_y,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rect_strategy() -> impl Strategy<Value = CropRect> {
        (0.0f64..=1000.0, 0.0f64..=1000.0, 0.1f64..=1000.0, 0.1f64..=1000.0)
            .prop_map(|(x, y, w, h)| CropRect::pixels(x, y, w, h))
    }

    proptest! {
        /// Property: doubling scale_x doubles the mapped x and width only.
        #[test]
        fn prop_mapping_linear_in_scale_x(
            rect in rect_strategy(),
            sx in 0.01f64..=50.0,
            sy in 0.01f64..=50.0,
        ) {
            let base = to_source_space(&rect, sx, sy).unwrap();
            let doubled = to_source_space(&rect, sx * 2.0, sy).unwrap();

            prop_assert!((doubled.x - 2.0 * base.x).abs() <= 1e-9 * base.x.abs().max(1.0));
            prop_assert!((doubled.width - 2.0 * base.width).abs() <= 1e-9 * base.width.max(1.0));
            prop_assert_eq!(doubled.y, base.y);
            prop_assert_eq!(doubled.height, base.height);
        }

        /// Property: doubling scale_y doubles the mapped y and height only.
        #[test]
        fn prop_mapping_linear_in_scale_y(
            rect in rect_strategy(),
            sx in 0.01f64..=50.0,
            sy in 0.01f64..=50.0,
        ) {
            let base = to_source_space(&rect, sx, sy).unwrap();
            let doubled = to_source_space(&rect, sx, sy * 2.0).unwrap();

            prop_assert!((doubled.y - 2.0 * base.y).abs() <= 1e-9 * base.y.abs().max(1.0));
            prop_assert!((doubled.height - 2.0 * base.height).abs() <= 1e-9 * base.height.max(1.0));
            prop_assert_eq!(doubled.x, base.x);
            prop_assert_eq!(doubled.width, base.width);
        }

        /// Property: a selection inside the layout maps inside the image.
        #[test]
        fn prop_inside_layout_maps_inside_image(
            (nw, nh) in (1u32..=4000, 1u32..=4000),
            (dw, dh) in (1.0f64..=2000.0, 1.0f64..=2000.0),
            (fx, fy, fw, fh) in (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        ) {
            let layout = DisplayLayout::new(nw, nh, dw, dh);
            let x = fx * dw;
            let y = fy * dh;
            let rect = CropRect::pixels(x, y, fw * (dw - x), fh * (dh - y));
            let src = layout.map_crop(&rect).unwrap();

            let tol = 1e-6;
            prop_assert!(src.x >= 0.0 && src.y >= 0.0);
            prop_assert!(src.x + src.width <= nw as f64 + tol);
            prop_assert!(src.y + src.height <= nh as f64 + tol);
        }
    }
}
