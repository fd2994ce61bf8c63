//! Global pixel-distribution adaptation entry point.

use crate::adapter::DomainAdapter;
use crate::color::ColorConversionPair;
use crate::error::AdaptResult;
use crate::image::blend::{
    ensure_same_channels, ensure_same_depth, match_reference_size, warn_if_outside_unit,
};
use crate::image::{blend, Image, Interpolation};
use crate::transform::{StatTransformer, TransformKind};

/// Move the global color statistics of `image` toward those of `reference`.
///
/// `transform_type` picks the transformer fitted on both images. The
/// adapted pixels are blended with the original as
/// `image · (1 - weight) + adapted · weight`, so weight 0 returns `image`
/// unchanged and weight 1 returns the fully adapted image. A reference of a
/// different spatial size is resized with area interpolation first.
///
/// # Errors
///
/// [`AdaptError::DepthMismatch`](crate::AdaptError::DepthMismatch) and
/// [`AdaptError::ChannelMismatch`](crate::AdaptError::ChannelMismatch) when
/// the two images disagree on sample type or channel count.
pub fn adapt_pixel_distribution(
    image: &Image,
    reference: &Image,
    transform_type: TransformKind,
    weight: f32,
) -> AdaptResult<Image> {
    adapt_pixel_distribution_with(
        image,
        reference,
        transform_type.build(),
        None,
        weight,
        Interpolation::Area,
    )
}

/// [`adapt_pixel_distribution`] with an explicit transformer template,
/// optional color-space round trip and reference resize mode.
pub fn adapt_pixel_distribution_with<T: StatTransformer>(
    image: &Image,
    reference: &Image,
    template: T,
    conversions: Option<ColorConversionPair>,
    weight: f32,
    interpolation: Interpolation,
) -> AdaptResult<Image> {
    ensure_same_depth(image, reference)?;
    ensure_same_channels(image, reference, "adapt_pixel_distribution")?;
    warn_if_outside_unit("weight", weight);

    let reference = match_reference_size(image, reference, interpolation)?;
    let adapter = DomainAdapter::new(template, &reference.to_uint8_array(), conversions)?;
    let adapted = adapter.adapt(&image.to_uint8_array())?;

    let scale = image.depth().max_value() / 255.0;
    let adapted = adapted.mapv(|v| f32::from(v) * scale);
    blend(image, &adapted, weight)
}
