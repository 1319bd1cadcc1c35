//! Core types for upload decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::DisplayLayout;

/// Error types for upload validation and decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The MIME type is not one of the accepted upload types.
    #[error("File type not supported: {0}. Please upload image/jpeg or image/png")]
    UnsupportedType(String),

    /// The upload is larger than the configured limit.
    #[error("File is too large ({size} bytes). Maximum size is {max_mb}MB")]
    FileTooLarge { size: usize, max_mb: f64 },

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Pixel data does not match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Resolve an upload MIME type. Only `image/jpeg` and `image/png` are
    /// accepted.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    pub(crate) fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        }
    }
}

/// How a stored JPEG must be turned to appear upright: rotate clockwise by
/// `quarter_turns`, then mirror left to right if `mirrored`.
///
/// Every EXIF orientation tag maps onto one of these eight combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub quarter_turns: u8,
    pub mirrored: bool,
}

impl Orientation {
    pub const UPRIGHT: Orientation = Orientation {
        quarter_turns: 0,
        mirrored: false,
    };

    /// Decode an EXIF orientation tag. Unknown values read as upright.
    pub fn from_exif(tag: u32) -> Self {
        let (quarter_turns, mirrored) = match tag {
            2 => (0, true),
            3 => (2, false),
            4 => (2, true),
            5 => (1, true),
            6 => (1, false),
            7 => (3, true),
            8 => (3, false),
            _ => (0, false),
        };
        Orientation {
            quarter_turns,
            mirrored,
        }
    }
}

/// A decoded source image with RGBA pixel data and its laid-out size.
///
/// The pixels are never modified after decoding. The display size starts
/// out equal to the natural size and is updated once the view has laid the
/// image out.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    /// Intrinsic width in pixels.
    pub natural_width: u32,
    /// Intrinsic height in pixels.
    pub natural_height: u32,
    /// Width as rendered in the interactive view.
    pub display_width: f64,
    /// Height as rendered in the interactive view.
    pub display_height: f64,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create an image shown at its natural size.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidPixelData` if `pixels.len()` is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DecodeError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(DecodeError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            natural_width: width,
            natural_height: height,
            display_width: width as f64,
            display_height: height as f64,
            pixels,
        })
    }

    /// Create an image from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            natural_width: width,
            natural_height: height,
            display_width: width as f64,
            display_height: height as f64,
            pixels: img.into_raw(),
        }
    }

    /// Record the size the view laid the image out at.
    pub fn with_display_size(mut self, display_width: f64, display_height: f64) -> Self {
        self.set_display_size(display_width, display_height);
        self
    }

    pub fn set_display_size(&mut self, display_width: f64, display_height: f64) {
        self.display_width = display_width;
        self.display_height = display_height;
    }

    /// Natural and display dimensions for coordinate mapping.
    pub fn layout(&self) -> DisplayLayout {
        DisplayLayout::new(
            self.natural_width,
            self.natural_height,
            self.display_width,
            self.display_height,
        )
    }

    /// RGBA pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`. Callers must stay within the natural size.
    #[inline]
    pub(crate) fn rgba_at(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.natural_width as usize + x) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.natural_width as usize * self.natural_height as usize
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.natural_width == 0 || self.natural_height == 0 || self.pixels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_mime() {
        assert_eq!(ImageFormat::from_mime("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime(" IMAGE/PNG "), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime("image/gif"), None);
        assert_eq!(ImageFormat::from_mime("image/jpg"), None);
        assert_eq!(ImageFormat::from_mime(""), None);
    }

    #[test]
    fn test_format_names() {
        assert_eq!(ImageFormat::Png.mime(), "image/png");
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_orientation_from_exif() {
        assert_eq!(Orientation::from_exif(1), Orientation::UPRIGHT);
        assert_eq!(Orientation::from_exif(99), Orientation::UPRIGHT);
        let turned = Orientation::from_exif(6);
        assert_eq!((turned.quarter_turns, turned.mirrored), (1, false));
        let mirrored = Orientation::from_exif(7);
        assert_eq!((mirrored.quarter_turns, mirrored.mirrored), (3, true));
    }

    #[test]
    fn test_image_buffer_creation() {
        let img = ImageBuffer::new(100, 50, vec![0u8; 100 * 50 * 4]).unwrap();

        assert_eq!(img.natural_width, 100);
        assert_eq!(img.natural_height, 50);
        assert_eq!(img.display_width, 100.0);
        assert_eq!(img.display_height, 50.0);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_image_buffer_rejects_bad_length() {
        let result = ImageBuffer::new(10, 10, vec![0u8; 10 * 10 * 3]);
        assert!(matches!(
            result,
            Err(DecodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_display_size_and_layout() {
        let img = ImageBuffer::new(1000, 800, vec![0u8; 1000 * 800 * 4])
            .unwrap()
            .with_display_size(500.0, 400.0);
        let layout = img.layout();
        assert_eq!(layout.scale().unwrap(), (2.0, 2.0));
    }

    #[test]
    fn test_rgba_at() {
        let mut pixels = vec![0u8; 2 * 2 * 4];
        pixels[12..16].copy_from_slice(&[9, 8, 7, 6]);
        let img = ImageBuffer::new(2, 2, pixels).unwrap();
        assert_eq!(img.rgba_at(1, 1), [9, 8, 7, 6]);
        assert_eq!(img.rgba_at(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_image() {
        let img = ImageBuffer::new(0, 0, vec![]).unwrap();
        assert!(img.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedType("image/gif".to_string());
        assert_eq!(
            err.to_string(),
            "File type not supported: image/gif. Please upload image/jpeg or image/png"
        );

        let err = DecodeError::FileTooLarge {
            size: 3_000_000,
            max_mb: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "File is too large (3000000 bytes). Maximum size is 2MB"
        );
    }
}
