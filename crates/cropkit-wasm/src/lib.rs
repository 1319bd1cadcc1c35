//! Cropkit WASM - WebAssembly bindings for the cropkit crop engine
//!
//! This crate provides WASM bindings to expose the cropkit-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and crop results
//! - `settings` - Crop controls (shape, output size, zoom, size limit)
//! - `decode` - Upload validation and decoding (JPEG, PNG)
//! - `crop` - Initial selection, clamping and the crop pipeline
//! - `encode` - PNG encoding and size reporting
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_upload, initial_crop, apply_crop, JsCropSettings } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_upload(bytes, file.type, 2);
//! image.set_display_size(img.clientWidth, img.clientHeight);
//!
//! const settings = new JsCropSettings();
//! const result = apply_crop(image, initial_crop(image, settings), settings);
//! console.log(`${result.filename}: ${result.formatted_size}`);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod settings;
mod types;

// Re-export public types
pub use crop::{apply_crop, clamp_crop, initial_crop};
pub use decode::{decode_upload, validate_upload};
pub use encode::{encode_png, exceeds_size_limit, format_file_size, size_in_kb};
pub use settings::JsCropSettings;
pub use types::{JsCropResult, JsImageBuffer};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
