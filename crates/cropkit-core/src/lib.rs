//! Cropkit Core - crop rendering engine
//!
//! This crate turns a user's selection on a displayed image into a
//! fixed-size output raster: it places and clamps the selection, maps it
//! from display space to source pixels, resamples the region into the
//! requested circle, square or rectangle output, and encodes the result.
//!
//! # Pipeline
//!
//! ```text
//! decode_upload -> initial_crop / clamp -> map_crop -> render -> encode_png -> size
//! ```
//!
//! [`CropSession`] strings these stages together for the common case.

pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod output;
pub mod render;
pub mod session;
pub mod settings;
pub mod size;

pub use decode::{decode_upload, validate_upload, DecodeError, ImageBuffer, ImageFormat};
pub use encode::{encode_png, output_filename, EncodeError};
pub use error::CropError;
pub use geometry::{
    clamp, initial_crop, initial_crop_for, to_source_space, CropRect, CropUnit, DisplayLayout,
    SourceRect, ZoomFactor,
};
pub use mask::{clip_region, CircleMask, ShapeMask};
pub use output::{OutputBuffer, OutputSpec, Shape};
pub use render::{render, render_with, RenderOptions, ResampleFilter};
pub use session::{crop_image, CropResult, CropSession, SessionError};
pub use settings::{CropSettings, DimensionPreset};
pub use size::{exceeds_limit, format_file_size, size_in_kb};
