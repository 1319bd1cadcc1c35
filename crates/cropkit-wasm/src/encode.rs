//! Encoding and size reporting WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`size_in_kb`] - Convert a byte count to kilobytes
//! - [`format_file_size`] - Format a kilobyte size for display
//! - [`exceeds_size_limit`] - Compare a kilobyte size against a megabyte limit
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, size_in_kb, format_file_size } from '@cropkit/wasm';
//!
//! const png = encode_png(imageData.data, imageData.width, imageData.height);
//! console.log(`Encoded ${format_file_size(size_in_kb(png.byteLength))}`);
//! ```

use cropkit_core::{encode, size};
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_rgba_png(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a byte count to kilobytes (1 KB = 1024 bytes).
#[wasm_bindgen]
pub fn size_in_kb(byte_len: usize) -> f64 {
    size::size_in_kb(byte_len)
}

/// Format a kilobyte size, e.g. `"512 KB"` or `"1.50 MB"`.
#[wasm_bindgen]
pub fn format_file_size(size_kb: f64) -> String {
    size::format_file_size(size_kb)
}

/// Whether `size_kb` is above a limit given in megabytes.
#[wasm_bindgen]
pub fn exceeds_size_limit(size_kb: f64, max_size_mb: f64) -> bool {
    size::exceeds_limit(size_kb, max_size_mb)
}
