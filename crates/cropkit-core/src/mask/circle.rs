//! Circular clip region inscribed in the output raster.

use serde::{Deserialize, Serialize};

/// Disk in output pixel coordinates.
///
/// # Coordinate System
/// - (0, 0) = top-left corner of the output
/// - pixel `(px, py)` is sampled at its center `(px + 0.5, py + 0.5)`
///
/// Membership has a hard edge: a pixel is either drawn or shows the
/// background, never blended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleMask {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl CircleMask {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius: radius.max(0.0),
        }
    }

    /// Largest disk inscribed in a `width x height` raster.
    pub fn inscribed(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self::new(w / 2.0, h / 2.0, w.min(h) / 2.0)
    }

    /// Squared distance of a point from the center.
    #[inline]
    fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        dx * dx + dy * dy
    }

    /// Check if a point lies inside or on the circle.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.distance_sq(x, y) <= self.radius * self.radius
    }

    /// Check if the center of pixel `(px, py)` lies inside the circle.
    #[inline]
    pub fn contains(&self, px: u32, py: u32) -> bool {
        self.contains_point(px as f64 + 0.5, py as f64 + 0.5)
    }

    /// Area of the disk in square pixels.
    pub fn area(&self) -> f64 {
        std::f64::consts::PI * self.radius * self.radius
    }
}
