//! WASM-compatible wrapper types for images and crop results.
//!
//! This module provides JavaScript-friendly types that wrap the core cropkit types,
//! handling the conversion between Rust and JavaScript data representations.

use cropkit_core::{CropResult, ImageBuffer};
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

/// A decoded source image wrapper for JavaScript.
///
/// Holds the RGBA pixels at natural size together with the size the image
/// is laid out at in the page. Update the display size whenever the layout
/// changes; selections are always interpreted against it.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsImageBuffer {
    inner: ImageBuffer,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Create an image from its natural size and RGBA pixel data.
    ///
    /// # Arguments
    /// * `width` - Natural width in pixels
    /// * `height` - Natural height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// # Errors
    /// Returns an error if `pixels` is not `width * height * 4` bytes long
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImageBuffer, JsValue> {
        ImageBuffer::new(width, height, pixels)
            .map(Self::from_core)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Record the size the image is rendered at in the page.
    pub fn set_display_size(&mut self, display_width: f64, display_height: f64) {
        self.inner.set_display_size(display_width, display_height);
    }

    #[wasm_bindgen(getter)]
    pub fn natural_width(&self) -> u32 {
        self.inner.natural_width
    }

    #[wasm_bindgen(getter)]
    pub fn natural_height(&self) -> u32 {
        self.inner.natural_height
    }

    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> f64 {
        self.inner.display_width
    }

    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> f64 {
        self.inner.display_height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }
}

impl JsImageBuffer {
    pub(crate) fn from_core(inner: ImageBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &ImageBuffer {
        &self.inner
    }
}

/// A committed crop for JavaScript: the rendered raster, its PNG encoding
/// and size information for display.
#[wasm_bindgen]
pub struct JsCropResult {
    inner: CropResult,
}

#[wasm_bindgen]
impl JsCropResult {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.buffer.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.buffer.height
    }

    /// Rendered RGBA pixels, e.g. for an `ImageData` preview (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.buffer.pixels.clone()
    }

    /// PNG bytes, ready to wrap in a `Blob` for download.
    pub fn encoded(&self) -> Uint8Array {
        Uint8Array::from(self.inner.encoded.as_slice())
    }

    /// Encoded size in kilobytes.
    #[wasm_bindgen(getter)]
    pub fn size_kb(&self) -> f64 {
        self.inner.size_kb
    }

    /// Encoded size formatted for display, e.g. `"48 KB"`.
    #[wasm_bindgen(getter)]
    pub fn formatted_size(&self) -> String {
        self.inner.formatted_size()
    }

    /// Suggested download name, e.g. `cropped-image-200x200.png`.
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename.clone()
    }

    /// Whether the encoded size is above the configured limit.
    #[wasm_bindgen(getter)]
    pub fn exceeds_limit(&self) -> bool {
        self.inner.exceeds_limit
    }
}

impl JsCropResult {
    pub(crate) fn from_core(inner: CropResult) -> Self {
        Self { inner }
    }
}
