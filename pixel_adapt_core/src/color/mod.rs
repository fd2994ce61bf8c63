//! Named color-space conversions over 8-bit `[height, width, 3]` images.
//!
//! Encodings follow the common 8-bit conventions: Lab is stored as
//! `(L·255/100, a + 128, b + 128)` and YCrCb as BT.601 with a 128 chroma
//! offset. Every conversion has a paired inverse so the domain adapter can
//! leave and re-enter the caller's color space.

pub mod lab;

use std::str::FromStr;

use ndarray::{Array3, Axis, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{AdaptError, AdaptResult};

pub use lab::{lab_to_srgb, srgb_to_lab};

/// A named conversion between two 3-channel color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorConversion {
    RgbToLab,
    LabToRgb,
    #[serde(rename = "rgb_to_ycrcb")]
    RgbToYCrCb,
    #[serde(rename = "ycrcb_to_rgb")]
    YCrCbToRgb,
}

impl ColorConversion {
    /// The conversion that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            ColorConversion::RgbToLab => ColorConversion::LabToRgb,
            ColorConversion::LabToRgb => ColorConversion::RgbToLab,
            ColorConversion::RgbToYCrCb => ColorConversion::YCrCbToRgb,
            ColorConversion::YCrCbToRgb => ColorConversion::RgbToYCrCb,
        }
    }

    fn convert_pixel(self, px: [f32; 3]) -> [f32; 3] {
        match self {
            ColorConversion::RgbToLab => {
                let lab = srgb_to_lab([px[0] / 255.0, px[1] / 255.0, px[2] / 255.0]);
                [lab[0] * 255.0 / 100.0, lab[1] + 128.0, lab[2] + 128.0]
            }
            ColorConversion::LabToRgb => {
                let rgb = lab_to_srgb([px[0] * 100.0 / 255.0, px[1] - 128.0, px[2] - 128.0]);
                [rgb[0] * 255.0, rgb[1] * 255.0, rgb[2] * 255.0]
            }
            ColorConversion::RgbToYCrCb => {
                let y = 0.299 * px[0] + 0.587 * px[1] + 0.114 * px[2];
                [y, (px[0] - y) * 0.713 + 128.0, (px[2] - y) * 0.564 + 128.0]
            }
            ColorConversion::YCrCbToRgb => {
                let (y, cr, cb) = (px[0], px[1] - 128.0, px[2] - 128.0);
                [
                    y + 1.403 * cr,
                    y - 0.714 * cr - 0.344 * cb,
                    y + 1.773 * cb,
                ]
            }
        }
    }
}

impl FromStr for ColorConversion {
    type Err = AdaptError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "rgb_to_lab" | "rgb2lab" => Ok(ColorConversion::RgbToLab),
            "lab_to_rgb" | "lab2rgb" => Ok(ColorConversion::LabToRgb),
            "rgb_to_ycrcb" | "rgb2ycrcb" => Ok(ColorConversion::RgbToYCrCb),
            "ycrcb_to_rgb" | "ycrcb2rgb" => Ok(ColorConversion::YCrCbToRgb),
            other => Err(AdaptError::InvalidParameter {
                parameter: "color_conversion".into(),
                value: other.into(),
                constraint: "expected one of rgb_to_lab, lab_to_rgb, rgb_to_ycrcb, ycrcb_to_rgb"
                    .into(),
            }),
        }
    }
}

/// Forward conversion into a working color space and the conversion back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConversionPair {
    pub forward: ColorConversion,
    pub backward: ColorConversion,
}

impl ColorConversionPair {
    pub fn new(forward: ColorConversion) -> Self {
        Self {
            forward,
            backward: forward.inverse(),
        }
    }
}

/// Apply `conversion` to an 8-bit image, rounding and clipping the result.
pub fn convert(image: &Array3<u8>, conversion: ColorConversion) -> AdaptResult<Array3<u8>> {
    let (height, width, channels) = image.dim();
    if channels != 3 {
        return Err(AdaptError::UnsupportedConversion {
            conversion,
            channels,
        });
    }

    let mut output = Array3::<u8>::zeros((height, width, 3));
    Zip::from(output.lanes_mut(Axis(2)))
        .and(image.lanes(Axis(2)))
        .for_each(|mut dst, src| {
            let px = [f32::from(src[0]), f32::from(src[1]), f32::from(src[2])];
            let converted = conversion.convert_pixel(px);
            for (d, v) in dst.iter_mut().zip(converted) {
                *d = v.round().clamp(0.0, 255.0) as u8;
            }
        });
    Ok(output)
}
