//! Crop rectangles in display space and source space.

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Unit of a display-space crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropUnit {
    /// Absolute display pixels.
    #[default]
    #[serde(rename = "px")]
    Pixels,
    /// Percentage (0 to 100) of the display width/height.
    #[serde(rename = "%")]
    Percent,
}

/// A crop selection in display-space coordinates.
///
/// Values are relative to the image's unzoomed layout, never to the zoomed
/// presentation. See [`super::ZoomFactor::view_to_layout`] for converting
/// a selection drawn on the zoomed view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub unit: CropUnit,
}

impl CropRect {
    /// Rectangle in display pixels.
    pub fn pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            unit: CropUnit::Pixels,
        }
    }

    /// Rectangle in percent of the display size.
    pub fn percent(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            unit: CropUnit::Percent,
        }
    }

    /// Express this rectangle in display pixels.
    pub fn to_pixels(&self, display_width: f64, display_height: f64) -> CropRect {
        match self.unit {
            CropUnit::Pixels => *self,
            CropUnit::Percent => CropRect::pixels(
                self.x * display_width / 100.0,
                self.y * display_height / 100.0,
                self.width * display_width / 100.0,
                self.height * display_height / 100.0,
            ),
        }
    }

    /// Express this rectangle in percent of the display size.
    ///
    /// # Errors
    ///
    /// Returns `CropError::DegenerateScale` if either display dimension is
    /// not positive.
    pub fn to_percent(&self, display_width: f64, display_height: f64) -> Result<CropRect, CropError> {
        match self.unit {
            CropUnit::Percent => Ok(*self),
            CropUnit::Pixels => {
                if !(display_width > 0.0 && display_height > 0.0) {
                    return Err(CropError::degenerate_scale(format!(
                        "display size is {}x{}",
                        display_width, display_height
                    )));
                }
                Ok(CropRect::percent(
                    self.x * 100.0 / display_width,
                    self.y * 100.0 / display_height,
                    self.width * 100.0 / display_width,
                    self.height * 100.0 / display_height,
                ))
            }
        }
    }

    /// Width over height, `None` when the rectangle has no height.
    ///
    /// Only meaningful for pixel rectangles; a percent rectangle's ratio
    /// depends on the display aspect.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// True when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A region in natural (source) pixel coordinates. May be fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True when the region has no area (or is NaN).
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
