//! Crop settings WASM bindings.
//!
//! This module provides JavaScript bindings for the CropSettings type,
//! allowing the crop controls (shape, output size, zoom, size limit) to be
//! driven from TypeScript.

use cropkit_core::{CropSettings, DimensionPreset, ResampleFilter, Shape};
use wasm_bindgen::prelude::*;

/// Crop settings wrapper for JavaScript
#[wasm_bindgen]
pub struct JsCropSettings {
    inner: CropSettings,
}

#[wasm_bindgen]
impl JsCropSettings {
    /// Create settings with the defaults (square, 200x200, zoom 1, 2 MB)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CropSettings::default(),
        }
    }

    /// Create settings for an initial output size and shape name
    pub fn with_dimensions(width: u32, height: u32, shape: &str) -> Result<JsCropSettings, JsValue> {
        let shape = parse_shape(shape)?;
        Ok(Self {
            inner: CropSettings::with_dimensions(width, height, shape),
        })
    }

    /// Get the shape name ("circle", "square" or "rectangle")
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> String {
        self.inner.shape.as_str().to_string()
    }

    /// Select the output shape by name
    pub fn select_shape(&mut self, name: &str) -> Result<(), JsValue> {
        self.inner.shape = parse_shape(name)?;
        Ok(())
    }

    /// Get the preset name ("50x50", "50x75", "100x100", "200x200" or "custom")
    #[wasm_bindgen(getter)]
    pub fn preset(&self) -> String {
        self.inner.preset.as_str().to_string()
    }

    /// Select a dimension preset by name; fixed presets also pick a shape
    pub fn select_preset(&mut self, name: &str) -> Result<(), JsValue> {
        let preset = DimensionPreset::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown dimension preset: {}", name)))?;
        self.inner.select_preset(preset);
        Ok(())
    }

    /// Get custom width
    #[wasm_bindgen(getter)]
    pub fn custom_width(&self) -> u32 {
        self.inner.custom_width
    }

    /// Set custom width (zero is ignored)
    #[wasm_bindgen(setter)]
    pub fn set_custom_width(&mut self, value: u32) {
        self.inner.set_custom_width(value);
    }

    /// Get custom height
    #[wasm_bindgen(getter)]
    pub fn custom_height(&self) -> u32 {
        self.inner.custom_height
    }

    /// Set custom height (zero is ignored)
    #[wasm_bindgen(setter)]
    pub fn set_custom_height(&mut self, value: u32) {
        self.inner.set_custom_height(value);
    }

    /// Get zoom value
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.inner.zoom.value()
    }

    /// Set zoom value (saturates to 1.0..=3.0)
    #[wasm_bindgen(setter)]
    pub fn set_zoom(&mut self, value: f64) {
        self.inner.set_zoom(value);
    }

    /// Get the size limit in megabytes
    #[wasm_bindgen(getter)]
    pub fn max_size_mb(&self) -> f64 {
        self.inner.max_size_mb
    }

    /// Set the size limit in megabytes
    #[wasm_bindgen(setter)]
    pub fn set_max_size_mb(&mut self, value: f64) {
        self.inner.max_size_mb = value;
    }

    /// Get the resampling filter value
    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> u8 {
        match self.inner.filter {
            ResampleFilter::Bilinear => 0,
            ResampleFilter::CatmullRom => 1,
            ResampleFilter::Lanczos3 => 2,
        }
    }

    /// Set the resampling filter by value
    ///
    /// Values:
    /// - 0 = Bilinear (default)
    /// - 1 = Catmull-Rom
    /// - 2 = Lanczos3
    #[wasm_bindgen(setter)]
    pub fn set_filter(&mut self, value: u8) {
        self.inner.filter = filter_from_u8(value);
    }

    /// Current output width in pixels
    #[wasm_bindgen(getter)]
    pub fn output_width(&self) -> u32 {
        self.inner.dimensions().0
    }

    /// Current output height in pixels
    #[wasm_bindgen(getter)]
    pub fn output_height(&self) -> u32 {
        self.inner.dimensions().1
    }

    /// Aspect ratio the selection must keep
    pub fn aspect_ratio(&self) -> Result<f64, JsValue> {
        self.inner
            .aspect_ratio()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Serialize to JSON for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from JSON; missing fields take their defaults
    pub fn from_json(value: JsValue) -> Result<JsCropSettings, JsValue> {
        let inner: CropSettings =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsCropSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl JsCropSettings {
    /// Get a reference to the inner CropSettings for use in the crop bindings
    pub(crate) fn inner(&self) -> &CropSettings {
        &self.inner
    }
}

fn parse_shape(name: &str) -> Result<Shape, JsValue> {
    Shape::from_name(name).ok_or_else(|| JsValue::from_str(&format!("Unknown shape: {}", name)))
}

/// Convert a u8 filter value to the core ResampleFilter enum.
///
/// Any unknown value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> ResampleFilter {
    match value {
        1 => ResampleFilter::CatmullRom,
        2 => ResampleFilter::Lanczos3,
        _ => ResampleFilter::Bilinear,
    }
}
