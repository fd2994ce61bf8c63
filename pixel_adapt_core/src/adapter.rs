//! Statistics transfer between two 8-bit images through a fitted transformer.
//!
//! The adapter is fitted once on a reference image. Each call to
//! [`DomainAdapter::adapt`] fits a fresh copy of the unfitted template on the
//! source image, projects the source pixels with it and reconstructs them
//! through the reference-fitted transformer, so the output carries the
//! reference's statistics and the source's structure.

use std::borrow::Cow;

use ndarray::{Array2, Array3};

use crate::color::{convert, ColorConversion, ColorConversionPair};
use crate::error::{AdaptError, AdaptResult};
use crate::transform::StatTransformer;

/// Reference-fitted adapter generic over the transformer kind.
///
/// Adaptation borrows the adapter immutably and keeps all per-call state
/// local, so one adapter can serve several threads.
///
/// # Examples
///
/// ```
/// use ndarray::Array3;
/// use pixel_adapt_core::{DomainAdapter, MinMaxScaler};
///
/// let reference = Array3::<u8>::from_elem((8, 8, 3), 200);
/// let adapter = DomainAdapter::new(MinMaxScaler::new(), &reference, None).unwrap();
///
/// let source = Array3::<u8>::from_elem((8, 8, 3), 10);
/// let adapted = adapter.adapt(&source).unwrap();
/// assert!(adapted.iter().all(|&v| v == 200));
/// ```
#[derive(Debug, Clone)]
pub struct DomainAdapter<T: StatTransformer> {
    template: T,
    target: T,
    channels: usize,
    conversions: Option<ColorConversionPair>,
}

impl<T: StatTransformer> DomainAdapter<T> {
    /// Fit a copy of `template` to `reference`.
    ///
    /// With `conversions`, pixels are moved into the forward color space
    /// before fitting and the adapted result is moved back afterwards.
    pub fn new(
        template: T,
        reference: &Array3<u8>,
        conversions: Option<ColorConversionPair>,
    ) -> AdaptResult<Self> {
        let pixels = flatten(reference, conversions.map(|pair| pair.forward))?;
        let mut target = template.clone();
        target.fit(pixels.view())?;
        Ok(Self {
            template,
            target,
            channels: reference.dim().2,
            conversions,
        })
    }

    /// Transfer the reference statistics onto `image`.
    pub fn adapt(&self, image: &Array3<u8>) -> AdaptResult<Array3<u8>> {
        let (height, width, channels) = image.dim();
        if channels != self.channels {
            return Err(AdaptError::ChannelMismatch {
                expected: self.channels,
                got: channels,
                context: "DomainAdapter::adapt".into(),
            });
        }

        let pixels = flatten(image, self.conversions.map(|pair| pair.forward))?;
        let mut source = self.template.clone();
        source.fit(pixels.view())?;

        let target = self.aligned_target(&source);
        let representation = source.transform(pixels.view())?;
        let result = target.inverse_transform(representation.view())?;

        reconstruct(
            result,
            (height, width, channels),
            self.conversions.map(|pair| pair.backward),
        )
    }

    /// The reference-fitted transformer.
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn template(&self) -> &T {
        &self.template
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn conversions(&self) -> Option<ColorConversionPair> {
        self.conversions
    }

    fn aligned_target(&self, source: &T) -> T {
        if let (Some(source_sign), Some(target_sign)) =
            (source.orientation(), self.target.orientation())
        {
            if source_sign != target_sign {
                tracing::debug!(
                    "{} orientation differs (source {}, target {}); flipping target basis",
                    self.target.name(),
                    source_sign,
                    target_sign
                );
            }
        }
        self.target.aligned_to(source)
    }
}

/// Optional color conversion, then `/255`, then reshape to `N × C`.
///
/// Pixels are read in logical row-major order, so Fortran-ordered or
/// permuted inputs flatten the same way as standard ones.
fn flatten(image: &Array3<u8>, conversion: Option<ColorConversion>) -> AdaptResult<Array2<f64>> {
    let converted = match conversion {
        Some(conversion) => Cow::Owned(convert(image, conversion)?),
        None => Cow::Borrowed(image),
    };
    let (height, width, channels) = converted.dim();
    let normalized: Vec<f64> = converted.iter().map(|&v| f64::from(v) / 255.0).collect();
    Ok(Array2::from_shape_vec((height * width, channels), normalized)?)
}

/// `·255`, round, clip, reshape to `H × W × C`, then the optional backward conversion.
fn reconstruct(
    pixels: Array2<f64>,
    shape: (usize, usize, usize),
    conversion: Option<ColorConversion>,
) -> AdaptResult<Array3<u8>> {
    let quantized: Vec<u8> = pixels
        .iter()
        .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect();
    let samples = Array3::from_shape_vec(shape, quantized)?;
    match conversion {
        Some(conversion) => convert(&samples, conversion),
        None => Ok(samples),
    }
}
