//! Sample depth normalization between 8-bit and unit-float representations.

use ndarray::Array3;

const MAX_U8: f32 = 255.0;

/// 8-bit samples to floats in [0, 1].
pub fn to_float01(samples: &Array3<u8>) -> Array3<f32> {
    samples.mapv(|v| f32::from(v) / MAX_U8)
}

/// Unit floats to 8-bit samples (scale, round, clip).
///
/// Exact inverse of [`to_float01`] for values produced by it.
pub fn to_uint8(samples: &Array3<f32>) -> Array3<u8> {
    samples.mapv(|v| quantize(v * MAX_U8))
}

/// Floats already in 8-bit scale to 8-bit samples (round, clip).
pub fn clip_round_u8(samples: &Array3<f32>) -> Array3<u8> {
    samples.mapv(quantize)
}

/// Clip float samples to [0, 1].
pub fn clip_unit(samples: &Array3<f32>) -> Array3<f32> {
    samples.mapv(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) })
}

#[inline]
fn quantize(value: f32) -> u8 {
    // `as` saturates and maps NaN to 0
    value.round().clamp(0.0, MAX_U8) as u8
}
