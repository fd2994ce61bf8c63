//! Separable image resizing used to bring a reference image to the source's
//! spatial size.
//!
//! Each output axis is described by a list of `(source index, weight)` taps;
//! the 2-D result is the outer product of the row and column taps applied to
//! every channel.

use ndarray::{Array3, ArrayView3};
use serde::{Deserialize, Serialize};

use crate::error::{AdaptError, AdaptResult};

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Pixel-center bilinear interpolation
    #[default]
    Bilinear,
    /// Box average over the covered source area; bilinear when enlarging
    Area,
}

type Taps = Vec<Vec<(usize, f32)>>;

/// Resize `[height, width, channels]` samples to `height × width`.
pub fn resize(
    samples: &ArrayView3<'_, f32>,
    height: usize,
    width: usize,
    interpolation: Interpolation,
) -> AdaptResult<Array3<f32>> {
    let (src_height, src_width, channels) = samples.dim();
    if height == 0 || width == 0 {
        return Err(AdaptError::InvalidParameter {
            parameter: "size".into(),
            value: format!("{}x{}", height, width),
            constraint: "target dimensions must be non-zero".into(),
        });
    }
    if src_height == 0 || src_width == 0 {
        return Err(AdaptError::EmptyInput {
            context: "resize".into(),
        });
    }
    if (src_height, src_width) == (height, width) {
        return Ok(samples.to_owned());
    }

    let row_taps = axis_taps(src_height, height, interpolation);
    let col_taps = axis_taps(src_width, width, interpolation);

    let mut output = Array3::<f32>::zeros((height, width, channels));
    for (y, rows) in row_taps.iter().enumerate() {
        for (x, cols) in col_taps.iter().enumerate() {
            for c in 0..channels {
                let mut acc = 0.0f32;
                for &(sy, wy) in rows {
                    for &(sx, wx) in cols {
                        acc += wy * wx * samples[[sy, sx, c]];
                    }
                }
                output[[y, x, c]] = acc;
            }
        }
    }
    Ok(output)
}

fn axis_taps(src_len: usize, dst_len: usize, interpolation: Interpolation) -> Taps {
    match interpolation {
        Interpolation::Area if src_len > dst_len => area_taps(src_len, dst_len),
        _ => bilinear_taps(src_len, dst_len),
    }
}

fn bilinear_taps(src_len: usize, dst_len: usize) -> Taps {
    let scale = src_len as f32 / dst_len as f32;
    let max = (src_len - 1) as f32;
    (0..dst_len)
        .map(|dst| {
            let pos = ((dst as f32 + 0.5) * scale - 0.5).clamp(0.0, max);
            let i0 = pos.floor() as usize;
            let i1 = (i0 + 1).min(src_len - 1);
            let t = pos - i0 as f32;
            if i0 == i1 || t == 0.0 {
                vec![(i0, 1.0)]
            } else {
                vec![(i0, 1.0 - t), (i1, t)]
            }
        })
        .collect()
}

fn area_taps(src_len: usize, dst_len: usize) -> Taps {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|dst| {
            let start = dst as f64 * scale;
            let end = start + scale;
            let mut taps = Vec::new();
            let mut src = start.floor() as usize;
            while (src as f64) < end && src < src_len {
                let lo = start.max(src as f64);
                let hi = end.min(src as f64 + 1.0);
                if hi > lo {
                    taps.push((src, ((hi - lo) / scale) as f32));
                }
                src += 1;
            }
            taps
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_is_identity() {
        let samples = Array3::from_shape_fn((3, 4, 2), |(y, x, c)| (y + x + c) as f32);
        let out = resize(&samples.view(), 3, 4, Interpolation::Bilinear).unwrap();
        assert_eq!(out, samples);
    }

    #[test]
    fn area_downscale_averages_blocks() {
        let samples = Array3::from_shape_fn((4, 4, 1), |(y, x, _)| (y * 4 + x) as f32);
        let out = resize(&samples.view(), 2, 2, Interpolation::Area).unwrap();
        // top-left block: 0, 1, 4, 5
        assert!((out[[0, 0, 0]] - 2.5).abs() < 1e-5);
        // bottom-right block: 10, 11, 14, 15
        assert!((out[[1, 1, 0]] - 12.5).abs() < 1e-5);
    }

    #[test]
    fn area_taps_sum_to_one_for_fractional_scale() {
        for taps in area_taps(7, 3) {
            let total: f32 = taps.iter().map(|&(_, w)| w).sum();
            assert!((total - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn constant_image_stays_constant() {
        let samples = Array3::from_elem((5, 3, 3), 0.4f32);
        for interpolation in [Interpolation::Bilinear, Interpolation::Area] {
            let out = resize(&samples.view(), 8, 2, interpolation).unwrap();
            assert_eq!(out.dim(), (8, 2, 3));
            assert!(out.iter().all(|&v| (v - 0.4).abs() < 1e-6));
        }
    }

    #[test]
    fn zero_target_size_is_rejected() {
        let samples = Array3::from_elem((2, 2, 1), 1.0f32);
        let err = resize(&samples.view(), 0, 2, Interpolation::Area).unwrap_err();
        assert!(matches!(err, AdaptError::InvalidParameter { .. }));
    }
}
