//! Crop geometry: selection rectangles, initial placement, clamping and
//! mapping from display space to source pixels.
//!
//! # Coordinate Spaces
//!
//! - **Display space**: the image as laid out in the interactive view,
//!   before any presentation zoom. Committed selections live here.
//! - **Source space**: the decoded image's natural pixel grid.
//!
//! Origin is the top-left corner in both spaces.
//!
//! # Flow
//!
//! ```text
//! CropRect (display) --clamp--> CropRect (in bounds) --map--> SourceRect
//! ```

mod mapper;
mod rect;
mod resolver;
mod zoom;

pub use mapper::{to_source_space, DisplayLayout};
pub use rect::{CropRect, CropUnit, SourceRect};
pub use resolver::{clamp, initial_crop, initial_crop_for, ASPECT_TOLERANCE, INITIAL_COVERAGE};
pub use zoom::ZoomFactor;
