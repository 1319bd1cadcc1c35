//! Upload validation and decoding for the crop engine.
//!
//! This module provides functionality for:
//! - Checking an upload's MIME type and size against the configured limit
//! - Decoding JPEG and PNG uploads into an RGBA [`ImageBuffer`]
//! - Applying EXIF orientation so pixels match what the browser displays
//!
//! # Examples
//!
//! ```ignore
//! use cropkit_core::decode::decode_upload;
//!
//! let bytes = std::fs::read("avatar.png").unwrap();
//! let image = decode_upload(&bytes, "image/png", 2.0)
//!     .unwrap()
//!     .with_display_size(500.0, 400.0);
//! println!("Decoded {}x{} image", image.natural_width, image.natural_height);
//! ```

mod types;
mod upload;

pub use types::{DecodeError, ImageBuffer, ImageFormat, Orientation};
pub use upload::{decode_upload, extract_orientation, validate_upload};
