//! Histogram specification by cumulative-distribution matching.
//!
//! Every 8-bit value of the source is mapped to the template value found at
//! the same cumulative quantile, channel by channel.

use ndarray::{Array2, Array3, ArrayView2, Axis};
use rayon::prelude::*;

use crate::error::{AdaptError, AdaptResult};
use crate::image::blend::{
    ensure_not_empty, ensure_same_channels, match_reference_size, warn_if_outside_unit,
};
use crate::image::{blend, Image, Interpolation};

const LEVELS: usize = 256;

/// Remap one 8-bit channel so its cumulative histogram follows `template`.
///
/// Template values that never occur are skipped; source quantiles falling
/// between two present template values are interpolated linearly and the
/// result truncated. An empty template leaves the source unchanged.
pub fn match_cumulative_cdf(source: ArrayView2<'_, u8>, template: ArrayView2<'_, u8>) -> Array2<u8> {
    if source.is_empty() {
        return source.to_owned();
    }
    if template.is_empty() {
        tracing::warn!("histogram template is empty; source returned unchanged");
        return source.to_owned();
    }

    let source_quantiles = cumulative_quantiles(&counts(&source), source.len());
    let template_counts = counts(&template);
    let template_quantiles = cumulative_quantiles(&template_counts, template.len());

    let (values, quantiles): (Vec<f64>, Vec<f64>) = (0..LEVELS)
        .filter(|&v| template_counts[v] > 0)
        .map(|v| (v as f64, template_quantiles[v]))
        .unzip();

    let mut lookup = [0u8; LEVELS];
    for (entry, &q) in lookup.iter_mut().zip(source_quantiles.iter()) {
        *entry = interpolate(q, &quantiles, &values) as u8;
    }
    source.mapv(|v| lookup[usize::from(v)])
}

fn counts(channel: &ArrayView2<'_, u8>) -> [u64; LEVELS] {
    let mut counts = [0u64; LEVELS];
    for &v in channel.iter() {
        counts[usize::from(v)] += 1;
    }
    counts
}

fn cumulative_quantiles(counts: &[u64; LEVELS], total: usize) -> [f64; LEVELS] {
    let mut quantiles = [0.0; LEVELS];
    let mut running = 0u64;
    for (q, &count) in quantiles.iter_mut().zip(counts.iter()) {
        running += count;
        *q = running as f64 / total as f64;
    }
    quantiles
}

/// Piecewise-linear interpolation of `(xp, fp)` at `x`, clamped to the end
/// values. `xp` is strictly increasing and non-empty.
fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    let hi = xp.partition_point(|&q| q <= x);
    let lo = hi - 1;
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}

/// Match every channel of `image` to the matching channel of `reference`.
///
/// Spatial sizes may differ; channel counts may not.
pub fn match_histograms(image: &Array3<u8>, reference: &Array3<u8>) -> AdaptResult<Array3<u8>> {
    let channels = image.dim().2;
    if reference.dim().2 != channels {
        return Err(AdaptError::ChannelMismatch {
            expected: channels,
            got: reference.dim().2,
            context: "match_histograms".into(),
        });
    }

    let planes: Vec<Array2<u8>> = (0..channels)
        .into_par_iter()
        .map(|channel| {
            match_cumulative_cdf(
                image.index_axis(Axis(2), channel),
                reference.index_axis(Axis(2), channel),
            )
        })
        .collect();

    let mut matched = Array3::<u8>::zeros(image.dim());
    for (mut dst, plane) in matched.axis_iter_mut(Axis(2)).zip(planes.iter()) {
        dst.assign(plane);
    }
    Ok(matched)
}

/// Histogram-match `image` to `reference` and blend:
/// `matched · blend_ratio + image · (1 - blend_ratio)`.
///
/// The reference is resized to the image's spatial size (bilinear) when the
/// two differ. Matching runs on 8-bit samples; the blend happens in the
/// image's own scale and the result keeps its depth and 2-D form.
pub fn apply_histogram(image: &Image, reference: &Image, blend_ratio: f32) -> AdaptResult<Image> {
    warn_if_outside_unit("blend_ratio", blend_ratio);
    ensure_same_channels(image, reference, "apply_histogram")?;
    ensure_not_empty(image, "apply_histogram")?;
    ensure_not_empty(reference, "apply_histogram")?;

    let reference = match_reference_size(image, reference, Interpolation::Bilinear)?;
    let matched = match_histograms(&image.to_uint8_array(), &reference.to_uint8_array())?;

    let scale = image.depth().max_value() / 255.0;
    let matched = matched.mapv(|v| f32::from(v) * scale);
    blend(image, &matched, blend_ratio)
}
