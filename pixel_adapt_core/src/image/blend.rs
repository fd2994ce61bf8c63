//! Validation and blending helpers shared by the entry points.

use std::borrow::Cow;

use ndarray::Array3;

use super::{Image, Interpolation};
use crate::error::{AdaptError, AdaptResult};

/// Linear interpolation between `original` and `adapted`.
///
/// `adapted` holds float samples in the original image's scale. The result is
/// `original * (1 - weight) + adapted * weight`, cast back to the original
/// representation. Weight 0 returns the original samples exactly.
pub fn blend(original: &Image, adapted: &Array3<f32>, weight: f32) -> AdaptResult<Image> {
    if original.shape() != adapted.dim() {
        return Err(AdaptError::ShapeMismatch {
            expected: original.shape(),
            got: adapted.dim(),
            context: "blend".into(),
        });
    }
    let mut mixed = original.to_f32_samples();
    mixed.zip_mut_with(adapted, |o, &a| *o = *o * (1.0 - weight) + a * weight);
    Ok(Image::from_f32_samples(
        &mixed,
        original.depth(),
        original.is_mono_2d(),
    ))
}

pub(crate) fn ensure_same_depth(image: &Image, reference: &Image) -> AdaptResult<()> {
    if image.depth() != reference.depth() {
        return Err(AdaptError::DepthMismatch {
            image: image.depth(),
            reference: reference.depth(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_same_channels(
    image: &Image,
    reference: &Image,
    context: &str,
) -> AdaptResult<()> {
    if image.channels() != reference.channels() {
        return Err(AdaptError::ChannelMismatch {
            expected: image.channels(),
            got: reference.channels(),
            context: context.into(),
        });
    }
    Ok(())
}

pub(crate) fn ensure_not_empty(image: &Image, context: &str) -> AdaptResult<()> {
    if image.pixel_count() == 0 || image.channels() == 0 {
        return Err(AdaptError::EmptyInput {
            context: context.into(),
        });
    }
    Ok(())
}

/// Resize `reference` to the spatial size of `image` when the two differ.
pub(crate) fn match_reference_size<'a>(
    image: &Image,
    reference: &'a Image,
    interpolation: Interpolation,
) -> AdaptResult<Cow<'a, Image>> {
    let (height, width, _) = image.shape();
    if (reference.height(), reference.width()) == (height, width) {
        return Ok(Cow::Borrowed(reference));
    }
    tracing::debug!(
        "resizing reference from {}x{} to {}x{} ({:?})",
        reference.height(),
        reference.width(),
        height,
        width,
        interpolation
    );
    Ok(Cow::Owned(reference.resized(height, width, interpolation)?))
}

/// Blend weights and `beta` outside [0, 1] are accepted but flagged.
pub(crate) fn warn_if_outside_unit(parameter: &str, value: f32) {
    if !(0.0..=1.0).contains(&value) {
        tracing::warn!("{parameter} = {value} is outside [0, 1]; proceeding without clamping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PixelDepth;

    #[test]
    fn weight_zero_keeps_float_original_exactly() {
        let samples = Array3::from_shape_fn((3, 3, 1), |(y, x, _)| (y * 3 + x) as f32 / 9.7);
        let image = Image::from_f32(samples.clone());
        let adapted = Array3::from_elem((3, 3, 1), 0.9);
        let out = blend(&image, &adapted, 0.0).unwrap();
        assert_eq!(out.as_f32().unwrap(), &samples);
    }

    #[test]
    fn weight_one_returns_adapted_in_uint8() {
        let image = Image::from_u8(Array3::from_elem((2, 2, 3), 10));
        let adapted = Array3::from_elem((2, 2, 3), 200.0);
        let out = blend(&image, &adapted, 1.0).unwrap();
        assert!(out.as_u8().unwrap().iter().all(|&v| v == 200));
        assert_eq!(out.depth(), PixelDepth::U8);
    }

    #[test]
    fn blend_rejects_shape_mismatch() {
        let image = Image::from_u8(Array3::zeros((2, 2, 3)));
        let adapted = Array3::zeros((2, 3, 3));
        assert!(matches!(
            blend(&image, &adapted, 0.5),
            Err(AdaptError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn reference_is_borrowed_when_sizes_agree() {
        let image = Image::from_u8(Array3::zeros((4, 4, 3)));
        let reference = Image::from_u8(Array3::zeros((4, 4, 3)));
        let matched = match_reference_size(&image, &reference, Interpolation::Area).unwrap();
        assert!(matches!(matched, Cow::Borrowed(_)));

        let larger = Image::from_u8(Array3::zeros((8, 6, 3)));
        let matched = match_reference_size(&image, &larger, Interpolation::Area).unwrap();
        assert_eq!(matched.shape(), (4, 4, 3));
    }
}
