//! Raster compositor: resample a source region into the output raster.
//!
//! The output is first filled with the background color. The source region
//! is then resampled in two separable passes (horizontal into a scratch
//! buffer of premultiplied rows, then vertical) and every drawn pixel is
//! composited source-over the background. Pixels outside the clip region
//! or whose sample falls off the image keep the background exactly.

use serde::{Deserialize, Serialize};

use super::resample::{axis_samples, AxisSample, ResampleFilter};
use crate::decode::ImageBuffer;
use crate::error::CropError;
use crate::geometry::SourceRect;
use crate::mask::clip_region;
use crate::output::{OutputBuffer, OutputSpec};

/// An RGBA color.
pub type Rgba = [u8; 4];

/// Opaque white, the default background.
pub const WHITE: Rgba = [255, 255, 255, 255];

/// Rendering knobs that do not change the output geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub filter: ResampleFilter,
    /// Fill for pixels outside the clip region or off the image.
    pub background: Rgba,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            filter: ResampleFilter::default(),
            background: WHITE,
        }
    }
}

/// Render `source` from `image` into a raster of exactly the requested
/// output size, using bilinear resampling over a white background.
///
/// See [`render_with`] for details and errors.
pub fn render(
    image: &ImageBuffer,
    source: SourceRect,
    output: &OutputSpec,
) -> Result<OutputBuffer, CropError> {
    render_with(image, source, output, &RenderOptions::default())
}

/// Render `source` from `image` into a raster of exactly
/// `output.width x output.height` pixels.
///
/// Any aspect mismatch between the source region and the output is
/// absorbed by non-uniform scaling. Parts of the region that hang off the
/// image show the background.
///
/// # Errors
///
/// - `CropError::EmptySourceRegion` if `source` has no area
/// - `CropError::InvalidGeometry` for non-finite source coordinates, zero
///   output dimensions or an empty image
pub fn render_with(
    image: &ImageBuffer,
    source: SourceRect,
    output: &OutputSpec,
    options: &RenderOptions,
) -> Result<OutputBuffer, CropError> {
    if source.is_empty() {
        tracing::error!(
            width = source.width,
            height = source.height,
            "empty source region reached the compositor"
        );
        return Err(CropError::EmptySourceRegion {
            width: source.width,
            height: source.height,
        });
    }
    if !(source.x.is_finite()
        && source.y.is_finite()
        && source.width.is_finite()
        && source.height.is_finite())
    {
        return Err(CropError::invalid_geometry(format!(
            "source region must be finite, got {:?}",
            source
        )));
    }
    if output.width == 0 || output.height == 0 {
        return Err(CropError::invalid_geometry(format!(
            "output dimensions must be positive, got {}x{}",
            output.width, output.height
        )));
    }
    if image.is_empty() {
        return Err(CropError::invalid_geometry("source image has no pixels"));
    }

    tracing::debug!(
        ?source,
        width = output.width,
        height = output.height,
        shape = output.shape.as_str(),
        filter = ?options.filter,
        "rendering crop"
    );

    let (out_w, out_h) = (output.width, output.height);
    let mut out = OutputBuffer::filled(out_w, out_h, options.background);
    let mask = clip_region(output.shape, out_w, out_h);

    let xs = axis_samples(source.x, source.width, image.natural_width, out_w, options.filter);
    let ys = axis_samples(source.y, source.height, image.natural_height, out_h, options.filter);

    let Some((row_min, row_max)) = row_span(&ys) else {
        return Ok(out);
    };
    let rows = horizontal_pass(image, &xs, row_min, row_max);
    let background = premultiply(options.background);
    let width = out_w as usize;

    for (oy, y_sample) in ys.iter().enumerate() {
        if !y_sample.present {
            continue;
        }
        for (ox, x_sample) in xs.iter().enumerate() {
            if !x_sample.present || !mask.contains(ox as u32, oy as u32) {
                continue;
            }

            let mut acc = [0.0f32; 4];
            for &(iy, wy) in &y_sample.taps {
                let px = &rows[(iy - row_min) * width + ox];
                for (a, p) in acc.iter_mut().zip(px) {
                    *a += p * wy;
                }
            }

            let idx = (oy * width + ox) * 4;
            out.pixels[idx..idx + 4].copy_from_slice(&over(acc, background));
        }
    }

    tracing::debug!(bytes = out.byte_size(), "rendered crop");
    Ok(out)
}

/// Range of source rows touched by the vertical taps.
fn row_span(ys: &[AxisSample]) -> Option<(usize, usize)> {
    ys.iter()
        .flat_map(|s| s.taps.iter().map(|t| t.0))
        .fold(None, |span, row| match span {
            None => Some((row, row)),
            Some((lo, hi)) => Some((lo.min(row), hi.max(row))),
        })
}

/// Resample rows `row_min..=row_max` horizontally into premultiplied
/// scratch rows of output width.
fn horizontal_pass(
    image: &ImageBuffer,
    xs: &[AxisSample],
    row_min: usize,
    row_max: usize,
) -> Vec<[f32; 4]> {
    let mut rows = Vec::with_capacity((row_max - row_min + 1) * xs.len());
    for row in row_min..=row_max {
        for sample in xs {
            let mut acc = [0.0f32; 4];
            for &(ix, wx) in &sample.taps {
                let px = premultiply(image.rgba_at(ix, row));
                for (a, p) in acc.iter_mut().zip(px) {
                    *a += p * wx;
                }
            }
            rows.push(acc);
        }
    }
    rows
}

#[inline]
fn premultiply(rgba: Rgba) -> [f32; 4] {
    let a = rgba[3] as f32;
    [
        rgba[0] as f32 * a / 255.0,
        rgba[1] as f32 * a / 255.0,
        rgba[2] as f32 * a / 255.0,
        a,
    ]
}

/// Composite a premultiplied sample over a premultiplied background and
/// return straight-alpha bytes.
#[inline]
fn over(src: [f32; 4], background: [f32; 4]) -> Rgba {
    // Cubic kernels can overshoot; keep the sample a valid premultiplied color.
    let alpha = src[3].clamp(0.0, 255.0);
    let keep = 1.0 - alpha / 255.0;

    let out_alpha = alpha + background[3] * keep;
    if out_alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    for c in 0..3 {
        let premul = src[c].clamp(0.0, alpha) + background[c] * keep;
        out[c] = to_byte(premul * 255.0 / out_alpha);
    }
    out[3] = to_byte(out_alpha);
    out
}

#[inline]
fn to_byte(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Shape;

    fn solid(width: u32, height: u32, rgba: Rgba) -> ImageBuffer {
        let pixels: Vec<u8> = (0..width * height).flat_map(|_| rgba).collect();
        ImageBuffer::new(width, height, pixels).unwrap()
    }

    /// Image whose red channel is `x / 4` and green channel is `y / 4`.
    fn ramp(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x / 4) as u8, (y / 4) as u8, 0, 255]);
            }
        }
        ImageBuffer::new(width, height, pixels).unwrap()
    }

    fn checker(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x + y) % 2 == 0 { 200 } else { 30 };
                pixels.extend_from_slice(&[v, 255 - v, v / 2, 255]);
            }
        }
        ImageBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_reference_scenario_downscale() {
        // 1000x800 image shown at 500x400, 200x200 selection at (50, 40)
        let image = ramp(1000, 800);
        let source = SourceRect::new(100.0, 80.0, 400.0, 400.0);
        let spec = OutputSpec::new(100, 100, Shape::Square).unwrap();

        let out = render(&image, source, &spec).unwrap();
        assert_eq!((out.width, out.height), (100, 100));
        assert_eq!(out.pixels.len(), 100 * 100 * 4);

        for i in [0u32, 10, 50, 99] {
            let px = out.pixel(i, 50).unwrap();
            let expected = 25.5 + i as f64;
            assert!(
                (px[0] as f64 - expected).abs() <= 1.5,
                "column {} red {} expected ~{}",
                i,
                px[0],
                expected
            );
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_identity_reproduces_pixels() {
        let image = checker(8, 6);
        let source = SourceRect::new(0.0, 0.0, 8.0, 6.0);
        let spec = OutputSpec::new(8, 6, Shape::Square).unwrap();

        let out = render(&image, source, &spec).unwrap();
        assert_eq!(out.pixels, image.pixels());
    }

    #[test]
    fn test_pixel_aligned_subregion() {
        let image = checker(10, 10);
        let source = SourceRect::new(3.0, 2.0, 4.0, 4.0);
        let spec = OutputSpec::new(4, 4, Shape::Square).unwrap();

        let out = render(&image, source, &spec).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(
                    out.pixel(x, y).unwrap(),
                    image.rgba_at(x as usize + 3, y as usize + 2)
                );
            }
        }
    }

    #[test]
    fn test_transparent_source_shows_background() {
        let image = solid(4, 4, [10, 200, 30, 0]);
        let spec = OutputSpec::new(4, 4, Shape::Square).unwrap();

        let out = render(&image, SourceRect::new(0.0, 0.0, 4.0, 4.0), &spec).unwrap();
        assert!(out.pixels.chunks_exact(4).all(|px| px == WHITE));
    }

    #[test]
    fn test_half_transparent_over_white() {
        let image = solid(2, 2, [0, 0, 0, 128]);
        let spec = OutputSpec::new(2, 2, Shape::Square).unwrap();

        let out = render(&image, SourceRect::new(0.0, 0.0, 2.0, 2.0), &spec).unwrap();
        let px = out.pixel(0, 0).unwrap();
        assert_eq!(px[3], 255);
        assert!((px[0] as i32 - 127).abs() <= 1, "got {:?}", px);
    }

    #[test]
    fn test_custom_background() {
        let image = solid(4, 4, [0, 0, 0, 0]);
        let spec = OutputSpec::new(3, 3, Shape::Square).unwrap();
        let options = RenderOptions {
            background: [0, 0, 255, 255],
            ..RenderOptions::default()
        };

        let out =
            render_with(&image, SourceRect::new(0.0, 0.0, 4.0, 4.0), &spec, &options).unwrap();
        assert_eq!(out.pixel(1, 1), Some([0, 0, 255, 255]));
    }

    #[test]
    fn test_circle_outside_is_background() {
        let image = solid(50, 50, [255, 0, 0, 255]);
        let spec = OutputSpec::new(20, 20, Shape::Circle).unwrap();

        let out = render(&image, SourceRect::new(5.0, 5.0, 40.0, 40.0), &spec).unwrap();
        assert_eq!(out.pixel(0, 0), Some(WHITE));
        assert_eq!(out.pixel(19, 19), Some(WHITE));
        assert_eq!(out.pixel(10, 10), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_region_off_image_shows_background() {
        let image = solid(10, 10, [0, 0, 0, 255]);
        let spec = OutputSpec::new(10, 10, Shape::Square).unwrap();

        // Left half of the region lies off the image
        let out = render(&image, SourceRect::new(-5.0, 0.0, 10.0, 10.0), &spec).unwrap();
        assert_eq!(out.pixel(0, 5), Some(WHITE));
        assert_eq!(out.pixel(4, 5), Some(WHITE));
        assert_eq!(out.pixel(5, 5), Some([0, 0, 0, 255]));
        assert_eq!(out.pixel(9, 5), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_non_uniform_scaling_absorbs_aspect() {
        let image = ramp(100, 100);
        let spec = OutputSpec::new(50, 75, Shape::Rectangle).unwrap();

        let out = render(&image, SourceRect::new(0.0, 0.0, 100.0, 100.0), &spec).unwrap();
        assert_eq!((out.width, out.height), (50, 75));
    }

    #[test]
    fn test_upscale_solid_stays_solid() {
        let image = solid(3, 3, [40, 80, 120, 255]);
        for filter in [
            ResampleFilter::Bilinear,
            ResampleFilter::CatmullRom,
            ResampleFilter::Lanczos3,
        ] {
            let options = RenderOptions {
                filter,
                ..RenderOptions::default()
            };
            let spec = OutputSpec::new(30, 30, Shape::Square).unwrap();
            let out =
                render_with(&image, SourceRect::new(0.0, 0.0, 3.0, 3.0), &spec, &options).unwrap();
            assert!(
                out.pixels.chunks_exact(4).all(|px| px == [40, 80, 120, 255]),
                "{:?} changed a solid image",
                filter
            );
        }
    }

    #[test]
    fn test_empty_source_region() {
        let image = solid(4, 4, [0, 0, 0, 255]);
        let spec = OutputSpec::new(4, 4, Shape::Square).unwrap();

        let err = render(&image, SourceRect::new(1.0, 1.0, 0.0, 0.0), &spec).unwrap_err();
        assert!(matches!(err, CropError::EmptySourceRegion { .. }));
        assert!(err.is_defect());

        let err = render(&image, SourceRect::new(1.0, 1.0, 2.0, -1.0), &spec).unwrap_err();
        assert!(matches!(err, CropError::EmptySourceRegion { .. }));
    }

    #[test]
    fn test_invalid_inputs() {
        let image = solid(4, 4, [0, 0, 0, 255]);
        let spec = OutputSpec::new(4, 4, Shape::Square).unwrap();

        let err = render(&image, SourceRect::new(f64::NAN, 0.0, 2.0, 2.0), &spec).unwrap_err();
        assert!(matches!(err, CropError::InvalidGeometry(_)));

        let zero = OutputSpec {
            width: 0,
            height: 4,
            shape: Shape::Square,
        };
        let err = render(&image, SourceRect::new(0.0, 0.0, 2.0, 2.0), &zero).unwrap_err();
        assert!(matches!(err, CropError::InvalidGeometry(_)));

        let empty = ImageBuffer::new(0, 0, vec![]).unwrap();
        let err = render(&empty, SourceRect::new(0.0, 0.0, 2.0, 2.0), &spec).unwrap_err();
        assert!(matches!(err, CropError::InvalidGeometry(_)));
    }

    #[test]
    fn test_region_far_larger_than_image() {
        let image = solid(4, 4, [10, 120, 30, 255]);
        let spec = OutputSpec::new(1, 1, Shape::Square).unwrap();

        // Sample center far off the image shows the background
        let out = render(&image, SourceRect::new(0.0, 0.0, 1e20, 4.0), &spec).unwrap();
        assert_eq!(out.pixel(0, 0), Some(WHITE));

        // Sample center on the image collapses onto the image pixels
        let source = SourceRect::new(-1.0e7 + 2.0, 0.0, 2.0e7, 4.0);
        for filter in [
            ResampleFilter::Bilinear,
            ResampleFilter::CatmullRom,
            ResampleFilter::Lanczos3,
        ] {
            let options = RenderOptions {
                filter,
                ..RenderOptions::default()
            };
            let out = render_with(&image, source, &spec, &options).unwrap();
            assert_eq!(out.pixel(0, 0), Some([10, 120, 30, 255]));
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let image = checker(37, 23);
        let source = SourceRect::new(1.3, 2.7, 30.1, 17.9);
        let spec = OutputSpec::new(13, 11, Shape::Circle).unwrap();

        let a = render(&image, source, &spec).unwrap();
        let b = render(&image, source, &spec).unwrap();
        assert_eq!(a, b);
    }
}
