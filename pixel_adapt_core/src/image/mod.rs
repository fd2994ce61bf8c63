//! Image container shared by every adaptation entry point.
//!
//! Images are stored as `[height, width, channels]` arrays of either 8-bit
//! samples in [0, 255] or `f32` samples nominally in [0, 1]. Mono images
//! supplied as 2-D arrays are kept as single-channel 3-D arrays and remember
//! that they must be handed back without the channel axis.

pub mod blend;
pub mod convert;
pub mod resize;

use std::fmt::{self, Display};

use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

pub use blend::blend;
pub use convert::{clip_round_u8, clip_unit, to_float01, to_uint8};
pub use resize::{resize, Interpolation};

/// Sample representation of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelDepth {
    /// 8-bit unsigned samples in [0, 255]
    U8,
    /// 32-bit float samples in [0, 1]
    F32,
}

impl PixelDepth {
    /// Largest valid sample value for this representation.
    pub fn max_value(self) -> f32 {
        match self {
            PixelDepth::U8 => 255.0,
            PixelDepth::F32 => 1.0,
        }
    }
}

impl Display for PixelDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PixelDepth::U8 => write!(f, "uint8"),
            PixelDepth::F32 => write!(f, "float32"),
        }
    }
}

/// Raw sample storage.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    U8(Array3<u8>),
    F32(Array3<f32>),
}

/// An image in the caller's representation.
///
/// # Examples
///
/// ```
/// use ndarray::Array2;
/// use pixel_adapt_core::{Image, PixelDepth};
///
/// let gray = Image::gray_u8(Array2::from_elem((4, 6), 17));
/// assert_eq!(gray.shape(), (4, 6, 1));
/// assert_eq!(gray.depth(), PixelDepth::U8);
/// assert!(gray.is_mono_2d());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    samples: Samples,
    mono_2d: bool,
}

impl Image {
    /// Wraps an 8-bit `[height, width, channels]` array.
    pub fn from_u8(samples: Array3<u8>) -> Self {
        Self {
            samples: Samples::U8(samples),
            mono_2d: false,
        }
    }

    /// Wraps a float `[height, width, channels]` array with samples in [0, 1].
    pub fn from_f32(samples: Array3<f32>) -> Self {
        Self {
            samples: Samples::F32(samples),
            mono_2d: false,
        }
    }

    /// Wraps an 8-bit `[height, width]` mono image.
    pub fn gray_u8(samples: Array2<u8>) -> Self {
        Self {
            samples: Samples::U8(samples.insert_axis(Axis(2))),
            mono_2d: true,
        }
    }

    /// Wraps a float `[height, width]` mono image.
    pub fn gray_f32(samples: Array2<f32>) -> Self {
        Self {
            samples: Samples::F32(samples.insert_axis(Axis(2))),
            mono_2d: true,
        }
    }

    /// Builds an image of `depth` from float samples expressed in that
    /// depth's scale. 8-bit output is rounded and clipped to [0, 255],
    /// float output is clipped to [0, 1].
    pub fn from_f32_samples(samples: &Array3<f32>, depth: PixelDepth, mono_2d: bool) -> Self {
        let samples = match depth {
            PixelDepth::U8 => Samples::U8(clip_round_u8(samples)),
            PixelDepth::F32 => Samples::F32(clip_unit(samples)),
        };
        Self { samples, mono_2d }
    }

    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    pub fn depth(&self) -> PixelDepth {
        match self.samples {
            Samples::U8(_) => PixelDepth::U8,
            Samples::F32(_) => PixelDepth::F32,
        }
    }

    /// `(height, width, channels)`
    pub fn shape(&self) -> (usize, usize, usize) {
        match &self.samples {
            Samples::U8(a) => a.dim(),
            Samples::F32(a) => a.dim(),
        }
    }

    pub fn height(&self) -> usize {
        self.shape().0
    }

    pub fn width(&self) -> usize {
        self.shape().1
    }

    pub fn channels(&self) -> usize {
        self.shape().2
    }

    pub fn pixel_count(&self) -> usize {
        let (h, w, _) = self.shape();
        h * w
    }

    /// True when the caller supplied a 2-D mono array.
    pub fn is_mono_2d(&self) -> bool {
        self.mono_2d
    }

    pub fn as_u8(&self) -> Option<&Array3<u8>> {
        match &self.samples {
            Samples::U8(a) => Some(a),
            Samples::F32(_) => None,
        }
    }

    pub fn as_f32(&self) -> Option<&Array3<f32>> {
        match &self.samples {
            Samples::F32(a) => Some(a),
            Samples::U8(_) => None,
        }
    }

    /// Mono images as a 2-D array in 8-bit form.
    pub fn to_gray_u8(&self) -> Option<Array2<u8>> {
        (self.channels() == 1).then(|| self.to_uint8_array().index_axis_move(Axis(2), 0))
    }

    /// Samples as `f32` in this image's own scale.
    pub fn to_f32_samples(&self) -> Array3<f32> {
        match &self.samples {
            Samples::U8(a) => a.mapv(f32::from),
            Samples::F32(a) => a.clone(),
        }
    }

    /// Samples as `f32` expressed in the scale of `depth`.
    pub fn to_f32_samples_in(&self, depth: PixelDepth) -> Array3<f32> {
        match (&self.samples, depth) {
            (Samples::U8(a), PixelDepth::U8) => a.mapv(f32::from),
            (Samples::U8(a), PixelDepth::F32) => to_float01(a),
            (Samples::F32(a), PixelDepth::F32) => a.clone(),
            (Samples::F32(a), PixelDepth::U8) => a.mapv(|v| v * 255.0),
        }
    }

    /// 8-bit copy of the samples; float samples are scaled, rounded and clipped.
    pub fn to_uint8_array(&self) -> Array3<u8> {
        match &self.samples {
            Samples::U8(a) => a.clone(),
            Samples::F32(a) => to_uint8(a),
        }
    }

    /// Float copy in [0, 1].
    pub fn to_float01_array(&self) -> Array3<f32> {
        match &self.samples {
            Samples::U8(a) => to_float01(a),
            Samples::F32(a) => a.clone(),
        }
    }

    /// Resized copy in the same representation.
    pub fn resized(
        &self,
        height: usize,
        width: usize,
        interpolation: Interpolation,
    ) -> crate::AdaptResult<Self> {
        let resized = resize(&self.to_f32_samples().view(), height, width, interpolation)?;
        Ok(Self::from_f32_samples(&resized, self.depth(), self.mono_2d))
    }

    /// Per-channel sample mean in this image's own scale.
    pub fn channel_means(&self) -> Vec<f32> {
        let samples = self.to_f32_samples();
        samples
            .axis_iter(Axis(2))
            .map(|plane| plane.mean().unwrap_or(0.0))
            .collect()
    }
}
