//! Presentation zoom.
//!
//! Zoom magnifies the displayed image about its center so the user can
//! frame a selection more precisely. It is a property of the view only:
//! the committed [`CropRect`] is always stored in unzoomed layout
//! coordinates, and nothing downstream of the selection reads the zoom.

use serde::{Deserialize, Serialize};

use crate::error::CropError;

use super::CropRect;

/// Presentation magnification in `[1.0, 3.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 3.0;
    /// Slider increment used by the controls.
    pub const STEP: f64 = 0.1;

    /// Unmagnified view.
    pub const IDENTITY: ZoomFactor = ZoomFactor(1.0);

    /// Create a zoom factor.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidGeometry` if `value` is non-finite or
    /// outside `[MIN, MAX]`.
    pub fn new(value: f64) -> Result<Self, CropError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(CropError::invalid_geometry(format!(
                "zoom must be within [{}, {}], got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Self(value))
    }

    /// Create a zoom factor, saturating out-of-range values. NaN maps to 1.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self::IDENTITY;
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert a rectangle drawn on the zoomed view back to layout
    /// coordinates.
    ///
    /// The view is the layout scaled by the zoom about its center
    /// `(display_width / 2, display_height / 2)`, so the inverse is
    /// `layout = (view - center) / zoom + center`. Percent rectangles are
    /// converted to pixels first.
    pub fn view_to_layout(&self, rect: &CropRect, display_width: f64, display_height: f64) -> CropRect {
        let rect = rect.to_pixels(display_width, display_height);
        let (cx, cy) = (display_width / 2.0, display_height / 2.0);
        CropRect::pixels(
            (rect.x - cx) / self.0 + cx,
            (rect.y - cy) / self.0 + cy,
            rect.width / self.0,
            rect.height / self.0,
        )
    }

    /// Where a layout rectangle appears on the zoomed view.
    pub fn layout_to_view(&self, rect: &CropRect, display_width: f64, display_height: f64) -> CropRect {
        let rect = rect.to_pixels(display_width, display_height);
        let (cx, cy) = (display_width / 2.0, display_height / 2.0);
        CropRect::pixels(
            (rect.x - cx) * self.0 + cx,
            (rect.y - cy) * self.0 + cy,
            rect.width * self.0,
            rect.height * self.0,
        )
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TryFrom<f64> for ZoomFactor {
    type Error = CropError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoomFactor> for f64 {
    fn from(zoom: ZoomFactor) -> Self {
        zoom.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bounds() {
        assert!(ZoomFactor::new(1.0).is_ok());
        assert!(ZoomFactor::new(3.0).is_ok());
        assert!(ZoomFactor::new(2.3).is_ok());
        assert!(matches!(
            ZoomFactor::new(0.99),
            Err(CropError::InvalidGeometry(_))
        ));
        assert!(ZoomFactor::new(3.01).is_err());
        assert!(ZoomFactor::new(f64::NAN).is_err());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(ZoomFactor::clamped(0.2).value(), 1.0);
        assert_eq!(ZoomFactor::clamped(7.0).value(), 3.0);
        assert_eq!(ZoomFactor::clamped(f64::NAN).value(), 1.0);
        assert_eq!(ZoomFactor::clamped(1.5).value(), 1.5);
    }

    #[test]
    fn test_identity_view_is_layout() {
        let rect = CropRect::pixels(10.0, 20.0, 30.0, 40.0);
        assert_eq!(ZoomFactor::IDENTITY.view_to_layout(&rect, 500.0, 400.0), rect);
    }

    #[test]
    fn test_view_to_layout_at_2x() {
        let zoom = ZoomFactor::new(2.0).unwrap();
        // Full view at 2x shows the central half of the layout
        let view = CropRect::pixels(0.0, 0.0, 500.0, 400.0);
        let layout = zoom.view_to_layout(&view, 500.0, 400.0);
        assert_eq!(layout, CropRect::pixels(125.0, 100.0, 250.0, 200.0));
    }

    #[test]
    fn test_round_trip_through_view() {
        let zoom = ZoomFactor::new(2.5).unwrap();
        let rect = CropRect::pixels(100.0, 80.0, 120.0, 60.0);
        let back = zoom.view_to_layout(&zoom.layout_to_view(&rect, 500.0, 400.0), 500.0, 400.0);
        assert!((back.x - rect.x).abs() < 1e-9);
        assert!((back.y - rect.y).abs() < 1e-9);
        assert!((back.width - rect.width).abs() < 1e-9);
        assert!((back.height - rect.height).abs() < 1e-9);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(ZoomFactor::try_from(5.0).is_err());
        let as_f64: f64 = ZoomFactor::new(1.5).unwrap().into();
        assert_eq!(as_f64, 1.5);
    }
}
