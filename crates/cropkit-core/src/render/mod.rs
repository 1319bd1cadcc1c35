//! Raster compositing of a source region into the output image.
//!
//! - [`resample`]: per-axis filter taps for scale-aware resampling
//! - [`compositor`]: background fill, clipping and source-over compositing

pub mod compositor;
pub mod resample;

pub use compositor::{render, render_with, RenderOptions, Rgba, WHITE};
pub use resample::{axis_samples, AxisSample, ResampleFilter};

pub use crate::output::OutputBuffer;
