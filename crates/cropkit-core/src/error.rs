//! Error type shared by the crop geometry and rendering stages.

use thiserror::Error;

/// Errors raised while resolving, mapping or rendering a crop.
///
/// None of these are retryable: every stage is a pure function of its
/// inputs, so calling again with the same inputs fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CropError {
    /// Non-positive or non-finite dimensions, aspect ratio or zoom.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// The image has no laid-out size, so no display-to-source scale exists.
    #[error("Degenerate scale: {0}")]
    DegenerateScale(String),

    /// The source region handed to the compositor has no area.
    ///
    /// Upstream clamping never produces this for a well-formed selection,
    /// so it indicates a caller defect rather than a user error.
    #[error("Empty source region: {width}x{height}")]
    EmptySourceRegion { width: f64, height: f64 },
}

impl CropError {
    pub fn invalid_geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    pub fn degenerate_scale(msg: impl Into<String>) -> Self {
        Self::DegenerateScale(msg.into())
    }

    /// Whether this error points at a bug upstream rather than bad input.
    pub fn is_defect(&self) -> bool {
        matches!(self, CropError::EmptySourceRegion { .. })
    }
}
