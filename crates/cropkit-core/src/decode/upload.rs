//! Upload validation and decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

use super::{DecodeError, ImageBuffer, ImageFormat, Orientation};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Check an upload's MIME type and size before decoding.
///
/// # Arguments
///
/// * `mime` - MIME type reported for the file
/// * `byte_len` - File size in bytes
/// * `max_size_mb` - Largest accepted file, in megabytes
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedType` for anything other than JPEG or
/// PNG, and `DecodeError::FileTooLarge` if `byte_len` exceeds the limit.
pub fn validate_upload(mime: &str, byte_len: usize, max_size_mb: f64) -> Result<ImageFormat, DecodeError> {
    let format = ImageFormat::from_mime(mime).ok_or_else(|| {
        tracing::warn!(mime, "rejected upload with unsupported type");
        DecodeError::UnsupportedType(mime.to_string())
    })?;

    if byte_len as f64 > max_size_mb * BYTES_PER_MB {
        tracing::warn!(byte_len, max_size_mb, "rejected oversized upload");
        return Err(DecodeError::FileTooLarge {
            size: byte_len,
            max_mb: max_size_mb,
        });
    }

    Ok(format)
}

/// Validate and decode an uploaded file into an RGBA image.
///
/// JPEG uploads have their EXIF orientation applied so the pixels match
/// what the browser displays. The returned image is laid out at its
/// natural size until the caller records the display size.
///
/// # Errors
///
/// Returns the validation errors of [`validate_upload`], or
/// `DecodeError::CorruptedFile` if the bytes do not decode as the declared
/// format.
pub fn decode_upload(bytes: &[u8], mime: &str, max_size_mb: f64) -> Result<ImageBuffer, DecodeError> {
    let format = validate_upload(mime, bytes.len(), max_size_mb)?;

    let orientation = match format {
        ImageFormat::Jpeg => extract_orientation(bytes),
        ImageFormat::Png => Orientation::UPRIGHT,
    };

    let img = image::load_from_memory_with_format(bytes, format.to_image_format())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let image = ImageBuffer::from_rgba_image(apply_orientation(img, orientation).into_rgba8());
    tracing::debug!(
        width = image.natural_width,
        height = image.natural_height,
        ?format,
        ?orientation,
        "decoded upload"
    );
    Ok(image)
}

/// Read the EXIF orientation of a JPEG. Files without a readable tag are
/// treated as upright.
pub fn extract_orientation(bytes: &[u8]) -> Orientation {
    Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from_exif)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    let turned = match orientation.quarter_turns % 4 {
        1 => img.rotate90(),
        2 => img.rotate180(),
        3 => img.rotate270(),
        _ => img,
    };
    if orientation.mirrored {
        turned.fliph()
    } else {
        turned
    }
}
