//! Encoding of the cropped result.
//!
//! This module provides functionality for:
//! - Encoding the output raster to PNG (lossless, RGBA)
//! - Naming the result for download
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::encode::{encode_png, output_filename};
//!
//! let png = encode_png(&buffer).unwrap();
//! println!("{}: {} bytes", output_filename(&spec, "png"), png.len());
//! ```

mod png;

pub use png::{encode_png, encode_rgba_png, output_filename, EncodeError};
