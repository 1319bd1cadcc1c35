//! Shape clipping for the output raster.
//!
//! ## Mask Types
//!
//! - **Full**: every output pixel is drawn (square and rectangle outputs)
//! - **Circle**: only pixels whose centers fall inside the inscribed disk
//!   are drawn; the rest keep the background fill
//!
//! ## Algorithm
//!
//! Masks are evaluated per pixel at the pixel center and return a plain
//! membership test. There is no feathering, so every excluded pixel is
//! exactly the background color.

pub mod circle;

pub use circle::CircleMask;

use crate::output::Shape;

/// Clip region for one output raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeMask {
    /// No clipping.
    Full,
    /// Disk inscribed in the output bounds.
    Circle(CircleMask),
}

impl ShapeMask {
    /// Check whether output pixel `(px, py)` is drawn.
    #[inline]
    pub fn contains(&self, px: u32, py: u32) -> bool {
        match self {
            ShapeMask::Full => true,
            ShapeMask::Circle(circle) => circle.contains(px, py),
        }
    }

    /// True when the mask excludes nothing.
    pub fn is_full(&self) -> bool {
        matches!(self, ShapeMask::Full)
    }
}

/// Build the clip region for a shape at the given output size.
///
/// `Circle` yields the disk centered at `(width / 2, height / 2)` with
/// radius `min(width, height) / 2`. `Square` and `Rectangle` clip nothing.
pub fn clip_region(shape: Shape, width: u32, height: u32) -> ShapeMask {
    match shape {
        Shape::Circle => ShapeMask::Circle(CircleMask::inscribed(width, height)),
        Shape::Square | Shape::Rectangle => ShapeMask::Full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_and_rectangle_are_full() {
        for shape in [Shape::Square, Shape::Rectangle] {
            let mask = clip_region(shape, 20, 30);
            assert!(mask.is_full());
            assert!(mask.contains(0, 0));
            assert!(mask.contains(19, 29));
        }
    }

    #[test]
    fn test_circle_excludes_corners() {
        let mask = clip_region(Shape::Circle, 100, 100);
        assert!(!mask.is_full());
        assert!(mask.contains(50, 50));
        assert!(!mask.contains(0, 0));
        assert!(!mask.contains(99, 99));
    }

    #[test]
    fn test_circle_on_non_square_output() {
        let mask = clip_region(Shape::Circle, 50, 75);
        // Disk has radius 25 centered at (25, 37.5)
        assert!(mask.contains(25, 37));
        assert!(!mask.contains(25, 2));
        assert!(!mask.contains(25, 72));
    }

    #[test]
    fn test_circle_covers_about_pi_over_four() {
        let (w, h) = (200u32, 200u32);
        let mask = clip_region(Shape::Circle, w, h);
        let inside = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| mask.contains(x, y))
            .count();
        let ratio = inside as f64 / (w * h) as f64;
        assert!((ratio - std::f64::consts::FRAC_PI_4).abs() < 0.01, "ratio {}", ratio);
    }
}
