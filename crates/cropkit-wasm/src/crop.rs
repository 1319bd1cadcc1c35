//! Crop WASM bindings.
//!
//! This module exposes the crop pipeline to JavaScript. Selection rectangles
//! cross the boundary as plain objects:
//!
//! ```typescript
//! { x: number, y: number, width: number, height: number, unit?: "px" | "%" }
//! ```
//!
//! # Functions
//!
//! - [`initial_crop`] - Centered starting selection for the current settings
//! - [`clamp_crop`] - Bring a dragged selection back inside the image
//! - [`apply_crop`] - Render, encode and size a committed selection
//!
//! # Example
//!
//! ```typescript
//! import { initial_crop, apply_crop, JsCropSettings } from '@cropkit/wasm';
//!
//! const settings = new JsCropSettings();
//! settings.select_preset('50x75');
//! let rect = initial_crop(image, settings);
//! // ... user drags the selection ...
//! const result = apply_crop(image, rect, settings);
//! const blob = new Blob([result.encoded()], { type: 'image/png' });
//! ```

use crate::settings::JsCropSettings;
use crate::types::{JsCropResult, JsImageBuffer};
use cropkit_core::geometry;
use cropkit_core::{crop_image, CropRect, CropResult, SessionError};
use wasm_bindgen::prelude::*;

/// Compute the centered initial selection for an image.
///
/// The selection covers 90% of the display width at the aspect ratio the
/// settings require, or the full display height if that would be too tall.
///
/// # Returns
///
/// A `{ x, y, width, height, unit }` object in display pixels.
#[wasm_bindgen]
pub fn initial_crop(image: &JsImageBuffer, settings: &JsCropSettings) -> Result<JsValue, JsValue> {
    let rect = initial_rect(image, settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&rect).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Bring a selection fully inside the displayed image, shrinking it
/// (aspect preserved) if it is larger than the image.
#[wasm_bindgen]
pub fn clamp_crop(image: &JsImageBuffer, rect: JsValue) -> Result<JsValue, JsValue> {
    let rect = rect_from_js(rect)?;
    let img = image.inner();
    let clamped = geometry::clamp(&rect, img.display_width, img.display_height)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&clamped).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a committed selection into the output raster and encode it.
///
/// `rect` is in unzoomed display coordinates. Zoom in `settings` never
/// changes the rendered region.
///
/// # Errors
///
/// Returns an error for invalid settings or selections, an image without a
/// laid-out size, or a selection with no area (also logged to the console).
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsImageBuffer,
    rect: JsValue,
    settings: &JsCropSettings,
) -> Result<JsCropResult, JsValue> {
    let rect = rect_from_js(rect)?;
    commit(image, &rect, settings)
        .map(JsCropResult::from_core)
        .map_err(|e| {
            if e.is_defect() {
                web_sys::console::error_1(&JsValue::from_str(&format!("cropkit defect: {}", e)));
            }
            JsValue::from_str(&e.to_string())
        })
}

fn rect_from_js(rect: JsValue) -> Result<CropRect, JsValue> {
    serde_wasm_bindgen::from_value(rect)
        .map_err(|e| JsValue::from_str(&format!("Invalid crop rectangle: {}", e)))
}

fn initial_rect(image: &JsImageBuffer, settings: &JsCropSettings) -> Result<CropRect, SessionError> {
    let spec = settings.inner().output_spec()?;
    let img = image.inner();
    Ok(geometry::initial_crop_for(
        img.display_width,
        img.display_height,
        &spec,
        spec.aspect_ratio(),
    )?)
}

fn commit(
    image: &JsImageBuffer,
    rect: &CropRect,
    settings: &JsCropSettings,
) -> Result<CropResult, SessionError> {
    crop_image(image.inner(), rect, settings.inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cropkit_core::{CropError, ImageBuffer};

    fn image(width: u32, height: u32, display: (f64, f64)) -> JsImageBuffer {
        let pixels = vec![90u8; (width * height * 4) as usize];
        let mut img = JsImageBuffer::from_core(ImageBuffer::new(width, height, pixels).unwrap());
        img.set_display_size(display.0, display.1);
        img
    }

    #[test]
    fn test_initial_rect() {
        let img = image(1000, 800, (500.0, 400.0));
        let settings = JsCropSettings::new();

        let rect = initial_rect(&img, &settings).unwrap();
        assert!((rect.width - 400.0).abs() < 1e-9);
        assert!((rect.height - 400.0).abs() < 1e-9);
        assert!((rect.x - 50.0).abs() < 1e-9);
        assert!(rect.y.abs() < 1e-9);
    }

    #[test]
    fn test_commit() {
        let img = image(1000, 800, (500.0, 400.0));
        let mut settings = JsCropSettings::new();
        settings.select_preset("100x100").unwrap();

        let result = commit(&img, &CropRect::pixels(50.0, 40.0, 200.0, 200.0), &settings).unwrap();
        assert_eq!((result.buffer.width, result.buffer.height), (100, 100));
        assert_eq!(result.filename, "cropped-image-100x100.png");
    }

    #[test]
    fn test_commit_empty_selection_is_defect() {
        let img = image(10, 10, (10.0, 10.0));
        let settings = JsCropSettings::new();

        let err = commit(&img, &CropRect::pixels(2.0, 2.0, 0.0, 0.0), &settings).unwrap_err();
        assert!(err.is_defect());
        assert!(matches!(
            err,
            SessionError::Crop(CropError::EmptySourceRegion { .. })
        ));
    }
}
