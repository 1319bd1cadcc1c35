//! Output shape, target dimensions and the rendered raster.

use serde::{Deserialize, Serialize};

use crate::error::CropError;

/// Clipping geometry applied to the final raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Disk inscribed in the output bounds.
    Circle,
    /// Full output rectangle, 1:1 selection.
    #[default]
    Square,
    /// Full output rectangle, selection follows the output aspect.
    Rectangle,
}

impl Shape {
    /// Parse a lowercase shape name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" => Some(Shape::Circle),
            "square" => Some(Shape::Square),
            "rectangle" => Some(Shape::Rectangle),
            _ => None,
        }
    }

    /// Lowercase name, as used in settings and by the UI.
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Rectangle => "rectangle",
        }
    }
}

/// Target raster dimensions and shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub width: u32,
    pub height: u32,
    pub shape: Shape,
}

impl OutputSpec {
    /// Create an output spec, rejecting zero dimensions.
    pub fn new(width: u32, height: u32, shape: Shape) -> Result<Self, CropError> {
        if width == 0 || height == 0 {
            return Err(CropError::invalid_geometry(format!(
                "output dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            shape,
        })
    }

    /// Aspect ratio the interactive selection must keep for this output.
    ///
    /// Circle and square selections are always 1:1; rectangles follow
    /// `width / height` of the output.
    pub fn aspect_ratio(&self) -> f64 {
        match self.shape {
            Shape::Circle | Shape::Square => 1.0,
            Shape::Rectangle => self.width as f64 / self.height as f64,
        }
    }

    /// Number of pixels in the output raster.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Rendered RGBA raster of exactly `width x height` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    pub width: u32,
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl OutputBuffer {
    /// Allocate a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.pixels.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Convert to an `image::RgbaImage` for encoding.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}
