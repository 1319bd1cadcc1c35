//! Crop controls: output shape, dimension presets, zoom and limits.
//!
//! `CropSettings` is plain serde data so a host can persist it or pass a
//! partial object across the wasm boundary; missing fields take their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::ZoomFactor;
use crate::output::{OutputSpec, Shape};
use crate::render::{ResampleFilter, RenderOptions, Rgba, WHITE};

/// Output size choices offered by the controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DimensionPreset {
    #[serde(rename = "50x50")]
    P50x50,
    #[serde(rename = "50x75")]
    P50x75,
    #[serde(rename = "100x100")]
    P100x100,
    #[default]
    #[serde(rename = "200x200")]
    P200x200,
    /// Width and height come from the custom fields.
    #[serde(rename = "custom")]
    Custom,
}

impl DimensionPreset {
    pub const FIXED: [DimensionPreset; 4] = [
        DimensionPreset::P50x50,
        DimensionPreset::P50x75,
        DimensionPreset::P100x100,
        DimensionPreset::P200x200,
    ];

    /// Fixed `(width, height)`, or `None` for `Custom`.
    pub fn dimensions(self) -> Option<(u32, u32)> {
        match self {
            DimensionPreset::P50x50 => Some((50, 50)),
            DimensionPreset::P50x75 => Some((50, 75)),
            DimensionPreset::P100x100 => Some((100, 100)),
            DimensionPreset::P200x200 => Some((200, 200)),
            DimensionPreset::Custom => None,
        }
    }

    /// Shape selected along with the preset. The portrait preset implies a
    /// rectangle, other fixed presets a square, and `Custom` leaves the
    /// shape alone.
    pub fn implied_shape(self) -> Option<Shape> {
        match self {
            DimensionPreset::P50x75 => Some(Shape::Rectangle),
            DimensionPreset::Custom => None,
            _ => Some(Shape::Square),
        }
    }

    /// The fixed preset with exactly these dimensions, else `Custom`.
    pub fn matching(width: u32, height: u32) -> Self {
        Self::FIXED
            .into_iter()
            .find(|p| p.dimensions() == Some((width, height)))
            .unwrap_or(DimensionPreset::Custom)
    }

    /// Parse a preset name such as `"50x75"` or `"custom"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("custom") {
            return Some(DimensionPreset::Custom);
        }
        Self::FIXED.into_iter().find(|p| p.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DimensionPreset::P50x50 => "50x50",
            DimensionPreset::P50x75 => "50x75",
            DimensionPreset::P100x100 => "100x100",
            DimensionPreset::P200x200 => "200x200",
            DimensionPreset::Custom => "custom",
        }
    }
}

/// Everything the user can set before committing a crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CropSettings {
    pub shape: Shape,
    pub preset: DimensionPreset,
    /// Output width used when `preset` is `Custom`.
    pub custom_width: u32,
    /// Output height used when `preset` is `Custom`.
    pub custom_height: u32,
    /// Presentation zoom. Never affects the rendered region.
    pub zoom: ZoomFactor,
    /// Results above this size are flagged.
    pub max_size_mb: f64,
    pub filter: ResampleFilter,
    pub background: Rgba,
}

impl Default for CropSettings {
    fn default() -> Self {
        Self {
            shape: Shape::Square,
            preset: DimensionPreset::P200x200,
            custom_width: 200,
            custom_height: 200,
            zoom: ZoomFactor::IDENTITY,
            max_size_mb: 2.0,
            filter: ResampleFilter::default(),
            background: WHITE,
        }
    }
}

impl CropSettings {
    /// Settings for an initial output size and shape. The preset is the
    /// fixed one matching the size, or `Custom`.
    pub fn with_dimensions(width: u32, height: u32, shape: Shape) -> Self {
        Self {
            shape,
            preset: DimensionPreset::matching(width, height),
            custom_width: width,
            custom_height: height,
            ..Self::default()
        }
    }

    /// Switch preset, applying the shape it implies.
    pub fn select_preset(&mut self, preset: DimensionPreset) {
        self.preset = preset;
        if let Some(shape) = preset.implied_shape() {
            self.shape = shape;
        }
    }

    /// Set the custom width. Zero is ignored.
    pub fn set_custom_width(&mut self, width: u32) {
        if width > 0 {
            self.custom_width = width;
        }
    }

    /// Set the custom height. Zero is ignored.
    pub fn set_custom_height(&mut self, height: u32) {
        if height > 0 {
            self.custom_height = height;
        }
    }

    /// Set the zoom, saturating to the slider range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = ZoomFactor::clamped(zoom);
    }

    /// Current output dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        self.preset
            .dimensions()
            .unwrap_or((self.custom_width, self.custom_height))
    }

    /// Target raster for the current controls.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidGeometry` if the custom size is zero.
    pub fn output_spec(&self) -> Result<OutputSpec, CropError> {
        let (width, height) = self.dimensions();
        OutputSpec::new(width, height, self.shape)
    }

    /// Aspect ratio the selection must keep.
    pub fn aspect_ratio(&self) -> Result<f64, CropError> {
        Ok(self.output_spec()?.aspect_ratio())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            filter: self.filter,
            background: self.background,
        }
    }

    /// Check the settings describe a renderable output.
    ///
    /// # Errors
    ///
    /// Returns `CropError::InvalidGeometry` for a zero output size or a
    /// non-positive size limit.
    pub fn validate(&self) -> Result<(), CropError> {
        self.output_spec()?;
        if !(self.max_size_mb.is_finite() && self.max_size_mb > 0.0) {
            return Err(CropError::invalid_geometry(format!(
                "size limit must be positive, got {}MB",
                self.max_size_mb
            )));
        }
        Ok(())
    }
}
