//! One cropping session: a loaded image, the current controls and the last
//! committed result.
//!
//! Each [`CropSession::apply`] runs the full pipeline
//!
//! ```text
//! clamp -> map to source -> render -> encode PNG -> size
//! ```
//!
//! and only replaces the stored result once every stage has succeeded, so
//! a failed commit leaves the previous result untouched.

use thiserror::Error;

use crate::decode::{ImageBuffer, ImageFormat};
use crate::encode::{encode_png, output_filename, EncodeError};
use crate::error::CropError;
use crate::geometry::{clamp, initial_crop_for, CropRect};
use crate::output::OutputBuffer;
use crate::render::render_with;
use crate::settings::CropSettings;
use crate::size::{exceeds_limit, format_file_size, size_in_kb};

/// Errors from committing a crop.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Crop(#[from] CropError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// No image is loaded (never loaded, or cleared by `reset`).
    #[error("No image loaded")]
    NoImage,
}

impl SessionError {
    /// Whether this error points at a bug upstream rather than bad input.
    pub fn is_defect(&self) -> bool {
        matches!(self, SessionError::Crop(e) if e.is_defect())
    }
}

/// A committed crop, ready to download.
#[derive(Debug, Clone, PartialEq)]
pub struct CropResult {
    /// Rendered RGBA raster.
    pub buffer: OutputBuffer,
    /// PNG encoding of `buffer`.
    pub encoded: Vec<u8>,
    /// Encoded size in kilobytes.
    pub size_kb: f64,
    /// Suggested download name.
    pub filename: String,
    /// Whether the encoded size is above the configured limit.
    pub exceeds_limit: bool,
}

impl CropResult {
    /// Encoded size formatted for display, e.g. `"48 KB"`.
    pub fn formatted_size(&self) -> String {
        format_file_size(self.size_kb)
    }
}

#[derive(Debug, Clone)]
pub struct CropSession {
    image: Option<ImageBuffer>,
    settings: CropSettings,
    result: Option<CropResult>,
}

impl CropSession {
    pub fn new(image: ImageBuffer, settings: CropSettings) -> Self {
        Self {
            image: Some(image),
            settings,
            result: None,
        }
    }

    /// A session with no image loaded yet.
    pub fn empty(settings: CropSettings) -> Self {
        Self {
            image: None,
            settings,
            result: None,
        }
    }

    /// Load a new image, discarding any previous result.
    pub fn load(&mut self, image: ImageBuffer) {
        self.image = Some(image);
        self.result = None;
    }

    pub fn image(&self) -> Option<&ImageBuffer> {
        self.image.as_ref()
    }

    pub fn settings(&self) -> &CropSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut CropSettings {
        &mut self.settings
    }

    /// Last successfully committed result.
    pub fn result(&self) -> Option<&CropResult> {
        self.result.as_ref()
    }

    /// Record a new laid-out size for the loaded image.
    pub fn set_display_size(&mut self, display_width: f64, display_height: f64) -> Result<(), SessionError> {
        let image = self.image.as_mut().ok_or(SessionError::NoImage)?;
        image.set_display_size(display_width, display_height);
        Ok(())
    }

    /// Centered starting selection for the current controls.
    pub fn initial_crop(&self) -> Result<CropRect, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let spec = self.settings.output_spec()?;
        Ok(initial_crop_for(
            image.display_width,
            image.display_height,
            &spec,
            spec.aspect_ratio(),
        )?)
    }

    /// Commit a selection given in unzoomed display coordinates.
    ///
    /// # Errors
    ///
    /// - `CropError::InvalidGeometry` for invalid settings or selection
    /// - `CropError::DegenerateScale` if the image has no laid-out size
    /// - `CropError::EmptySourceRegion` for a selection with no area
    /// - `SessionError::NoImage` if nothing is loaded
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, rect: &CropRect) -> Result<&CropResult, SessionError> {
        let result = self.commit(rect)?;
        Ok(self.result.insert(result))
    }

    /// Commit a selection drawn on the zoomed view.
    ///
    /// The rectangle is brought back to layout coordinates with the current
    /// zoom before committing.
    pub fn apply_view(&mut self, rect: &CropRect) -> Result<&CropResult, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        let rect = self
            .settings
            .zoom
            .view_to_layout(rect, image.display_width, image.display_height);
        self.apply(&rect)
    }

    fn commit(&self, rect: &CropRect) -> Result<CropResult, SessionError> {
        let image = self.image.as_ref().ok_or(SessionError::NoImage)?;
        crop_image(image, rect, &self.settings)
    }

    /// Clear the image and result and return the zoom to 1.
    ///
    /// Shape and dimension choices are kept for the next image.
    pub fn reset(&mut self) -> &CropSettings {
        self.image = None;
        self.result = None;
        self.settings.zoom = Default::default();
        &self.settings
    }
}

/// Run the crop pipeline on a borrowed image without keeping any state.
///
/// `rect` is in unzoomed display coordinates of `image`.
pub fn crop_image(
    image: &ImageBuffer,
    rect: &CropRect,
    settings: &CropSettings,
) -> Result<CropResult, SessionError> {
    settings.validate()?;
    let spec = settings.output_spec()?;

    let layout = image.layout();
    layout.scale()?;
    let rect = clamp(rect, layout.display_width, layout.display_height)?;
    let source = layout.map_crop(&rect)?;

    let buffer = render_with(image, source, &spec, &settings.render_options())?;
    let encoded = encode_png(&buffer)?;

    let size_kb = size_in_kb(encoded.len());
    let exceeds_limit = exceeds_limit(size_kb, settings.max_size_mb);
    if exceeds_limit {
        tracing::warn!(
            size = %format_file_size(size_kb),
            max_size_mb = settings.max_size_mb,
            "cropped image exceeds the size limit"
        );
    }

    Ok(CropResult {
        buffer,
        encoded,
        size_kb,
        filename: output_filename(&spec, ImageFormat::Png.extension()),
        exceeds_limit,
    })
}
