//! Upload decoding WASM bindings.
//!
//! This module exposes the cropkit-core upload checks and decoder to JavaScript.
//!
//! # Functions
//!
//! - [`validate_upload`] - Check a file's MIME type and size before reading it
//! - [`decode_upload`] - Decode a JPEG or PNG upload into a `JsImageBuffer`
//!
//! # Example
//!
//! ```typescript
//! import { validate_upload, decode_upload } from '@cropkit/wasm';
//!
//! validate_upload(file.type, file.size, 2);
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upload(bytes, file.type, 2);
//! image.set_display_size(img.clientWidth, img.clientHeight);
//! ```

use crate::types::JsImageBuffer;
use cropkit_core::decode;
use wasm_bindgen::prelude::*;

/// Check an upload's MIME type and size.
///
/// # Arguments
///
/// * `mime` - The file's MIME type (`image/jpeg` or `image/png`)
/// * `byte_len` - The file size in bytes
/// * `max_size_mb` - Largest accepted file, in megabytes
///
/// # Errors
///
/// Returns an error message suitable for display if the type is not accepted
/// or the file is too large.
#[wasm_bindgen]
pub fn validate_upload(mime: &str, byte_len: usize, max_size_mb: f64) -> Result<(), JsValue> {
    decode::validate_upload(mime, byte_len, max_size_mb)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a JPEG or PNG upload.
///
/// JPEG EXIF orientation is applied so the pixels match what the browser
/// shows. The returned image is laid out at its natural size; call
/// `set_display_size` once it has been rendered in the page.
///
/// # Arguments
///
/// * `bytes` - The file contents as a `Uint8Array`
/// * `mime` - The file's MIME type
/// * `max_size_mb` - Largest accepted file, in megabytes
///
/// # Errors
///
/// Returns an error if the upload is rejected or the bytes fail to decode.
#[wasm_bindgen]
pub fn decode_upload(bytes: &[u8], mime: &str, max_size_mb: f64) -> Result<JsImageBuffer, JsValue> {
    decode::decode_upload(bytes, mime, max_size_mb)
        .map(JsImageBuffer::from_core)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
