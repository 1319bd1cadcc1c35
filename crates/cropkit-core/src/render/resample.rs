//! Separable, scale-aware resampling weights.
//!
//! # Algorithm
//!
//! Each output pixel `i` along an axis samples the source at
//!
//! ```text
//! center = origin + (i + 0.5) * scale,   scale = source_len / output_len
//! ```
//!
//! and gathers the source pixels whose centers fall within the filter
//! support around it. When downscaling, the kernel is stretched by `scale`
//! so that every covered source pixel contributes (a 4:1 reduction averages
//! roughly four pixels per axis instead of skipping three). Taps that fall
//! off the image are clamped to the nearest edge pixel. Weights are
//! normalized to sum to one.
//!
//! Because sample centers of an identity mapping land exactly on source
//! pixel centers, a 1:1 pixel-aligned resample reproduces its input.

use serde::{Deserialize, Serialize};

/// Interpolation filter for the resample step.
///
/// There is deliberately no nearest-neighbor option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResampleFilter {
    /// Tent filter (bilinear when magnifying).
    #[default]
    Bilinear,
    /// Catmull-Rom cubic, sharper than bilinear.
    CatmullRom,
    /// Lanczos with three lobes, highest quality.
    Lanczos3,
}

impl ResampleFilter {
    /// Kernel radius in source pixels at 1:1.
    pub fn support(self) -> f64 {
        match self {
            ResampleFilter::Bilinear => 1.0,
            ResampleFilter::CatmullRom => 2.0,
            ResampleFilter::Lanczos3 => 3.0,
        }
    }

    /// Evaluate the kernel at distance `t` (in kernel units).
    pub fn kernel(self, t: f64) -> f64 {
        let t = t.abs();
        match self {
            ResampleFilter::Bilinear => (1.0 - t).max(0.0),
            ResampleFilter::CatmullRom => {
                if t < 1.0 {
                    1.5 * t * t * t - 2.5 * t * t + 1.0
                } else if t < 2.0 {
                    -0.5 * t * t * t + 2.5 * t * t - 4.0 * t + 2.0
                } else {
                    0.0
                }
            }
            ResampleFilter::Lanczos3 => {
                if t < 3.0 {
                    sinc(t) * sinc(t / 3.0)
                } else {
                    0.0
                }
            }
        }
    }
}

#[inline]
fn sinc(t: f64) -> f64 {
    if t == 0.0 {
        1.0
    } else {
        let a = t * std::f64::consts::PI;
        a.sin() / a
    }
}

/// Contributions of source pixels to one output pixel along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSample {
    /// `(source_index, weight)` pairs; weights sum to one.
    pub taps: Vec<(usize, f32)>,
    /// Whether the sample center lies on the image. Absent samples show the
    /// background.
    pub present: bool,
}

/// Compute resampling taps for one axis.
///
/// # Arguments
///
/// * `origin` - Start of the source region (may be fractional)
/// * `length` - Extent of the source region, must be positive
/// * `source_size` - Number of pixels in the source image along this axis
/// * `output_size` - Number of output pixels along this axis
/// * `filter` - Interpolation kernel
pub fn axis_samples(
    origin: f64,
    length: f64,
    source_size: u32,
    output_size: u32,
    filter: ResampleFilter,
) -> Vec<AxisSample> {
    let scale = length / output_size as f64;
    let filter_scale = scale.max(1.0);
    let support = filter.support() * filter_scale;
    let last = source_size.saturating_sub(1) as i64;
    let edge = last as f64;

    (0..output_size)
        .map(|i| {
            let center = origin + (i as f64 + 0.5) * scale;
            let present = center >= 0.0 && center < source_size as f64;

            let left = (center - support).floor();
            let right = (center + support).ceil();
            let weight = |j: f64| filter.kernel((j + 0.5 - center) / filter_scale);

            let mut taps: Vec<(usize, f64)> = Vec::new();
            let mut total = 0.0;
            let mut push = |idx: i64, w: f64| {
                if w != 0.0 {
                    taps.push((idx as usize, w));
                    total += w;
                }
            };

            // Positions off either edge all clamp onto the edge pixel.
            push(0, overhang_weight(&weight, left, right.min(-1.0)));
            let first = left.max(0.0).min(edge + 1.0) as i64;
            let end = right.min(edge).max(-1.0) as i64;
            for j in first..=end {
                push(j, weight(j as f64));
            }
            push(last, overhang_weight(&weight, left.max(edge + 1.0), right));

            let taps = if total.abs() > f64::EPSILON {
                taps.into_iter()
                    .map(|(idx, w)| (idx, (w / total) as f32))
                    .collect()
            } else {
                // Kernel vanished (only possible for tiny supports); fall back
                // to the pixel under the center.
                let idx = (center.floor() as i64).clamp(0, last) as usize;
                vec![(idx, 1.0)]
            };

            AxisSample { taps, present }
        })
        .collect()
}

/// Maximum kernel evaluations spent on the off-image part of one sample.
const MAX_OVERHANG_SAMPLES: f64 = 1024.0;

/// Summed kernel weight of the integer positions `from..=to`.
///
/// Short runs are summed exactly. Longer runs, which only occur when the
/// kernel is stretched far beyond the image, are summed in strides with each
/// evaluation standing for the positions it covers.
fn overhang_weight(weight: &impl Fn(f64) -> f64, from: f64, to: f64) -> f64 {
    let count = to - from + 1.0;
    if !(count >= 1.0 && count.is_finite()) {
        return 0.0;
    }
    let stride = (count / MAX_OVERHANG_SAMPLES).ceil().max(1.0);
    let mut sum = 0.0;
    let mut j = from;
    while j <= to {
        let span = stride.min(to - j + 1.0);
        sum += weight(j + (span - 1.0) / 2.0) * span;
        j += stride;
    }
    sum
}
