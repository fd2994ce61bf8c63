//! Adaptation parameters loaded from TOML.
//!
//! Every section is optional and falls back to its defaults:
//!
//! ```toml
//! [pixel_distribution]
//! transform = "pca"            # "pca" | "standard" | "minmax"
//! weight = 0.5
//! color_conversion = "rgb_to_lab"
//!
//! [fourier]
//! beta = 0.1
//!
//! [histogram]
//! blend_ratio = 0.5
//!
//! [resize]
//! interpolation = "area"       # "area" | "bilinear"
//! ```
//!
//! Unlike the entry points, which accept out-of-range weights with a
//! warning, configuration rejects any weight, `beta` or ratio outside [0, 1].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{ColorConversion, ColorConversionPair};
use crate::error::AdaptResult;
use crate::histogram::apply_histogram;
use crate::image::{Image, Interpolation};
use crate::pixel_distribution::adapt_pixel_distribution_with;
use crate::spectral::fourier_domain_adaptation;
use crate::transform::TransformKind;

/// Parameters for all three entry points.
///
/// # Examples
///
/// ```
/// use pixel_adapt_core::AdaptationConfig;
///
/// let config = AdaptationConfig::from_str("[fourier]\nbeta = 0.05").unwrap();
/// assert_eq!(config.fourier.beta, 0.05);
/// assert_eq!(config.histogram.blend_ratio, 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdaptationConfig {
    pub pixel_distribution: PixelDistributionConfig,
    pub fourier: FourierConfig,
    pub histogram: HistogramConfig,
}

impl AdaptationConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawAdaptationConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        Ok(Self {
            pixel_distribution: PixelDistributionConfig::try_from(
                &raw.pixel_distribution,
                &raw.resize,
            )?,
            fourier: FourierConfig::try_from(&raw.fourier)?,
            histogram: HistogramConfig::try_from(&raw.histogram)?,
        })
    }
}

/// `[pixel_distribution]` plus the reference resize mode from `[resize]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelDistributionConfig {
    pub transform: TransformKind,
    pub weight: f32,
    pub color_conversion: Option<ColorConversion>,
    pub interpolation: Interpolation,
}

impl PixelDistributionConfig {
    fn try_from(raw: &RawPixelDistribution, resize: &RawResize) -> Result<Self, ConfigError> {
        Ok(Self {
            transform: raw.transform,
            weight: unit_interval("pixel_distribution.weight", raw.weight)?,
            color_conversion: raw.color_conversion,
            interpolation: resize.interpolation,
        })
    }

    pub fn apply(&self, image: &Image, reference: &Image) -> AdaptResult<Image> {
        adapt_pixel_distribution_with(
            image,
            reference,
            self.transform.build(),
            self.color_conversion.map(ColorConversionPair::new),
            self.weight,
            self.interpolation,
        )
    }
}

impl Default for PixelDistributionConfig {
    fn default() -> Self {
        Self {
            transform: default_transform(),
            weight: default_weight(),
            color_conversion: None,
            interpolation: default_interpolation(),
        }
    }
}

/// `[fourier]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourierConfig {
    pub beta: f32,
}

impl FourierConfig {
    fn try_from(raw: &RawFourier) -> Result<Self, ConfigError> {
        Ok(Self {
            beta: unit_interval("fourier.beta", raw.beta)?,
        })
    }

    pub fn apply(&self, image: &Image, target: &Image) -> AdaptResult<Image> {
        fourier_domain_adaptation(image, target, self.beta)
    }
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            beta: default_beta(),
        }
    }
}

/// `[histogram]`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramConfig {
    pub blend_ratio: f32,
}

impl HistogramConfig {
    fn try_from(raw: &RawHistogram) -> Result<Self, ConfigError> {
        Ok(Self {
            blend_ratio: unit_interval("histogram.blend_ratio", raw.blend_ratio)?,
        })
    }

    pub fn apply(&self, image: &Image, reference: &Image) -> AdaptResult<Image> {
        apply_histogram(image, reference, self.blend_ratio)
    }
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            blend_ratio: default_blend_ratio(),
        }
    }
}

fn unit_interval(name: &str, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::Parse(format!(
            "{} must be within [0, 1], got {}",
            name, value
        )));
    }
    Ok(value)
}

#[derive(Debug, Default, Deserialize)]
struct RawAdaptationConfig {
    #[serde(default)]
    pixel_distribution: RawPixelDistribution,
    #[serde(default)]
    fourier: RawFourier,
    #[serde(default)]
    histogram: RawHistogram,
    #[serde(default)]
    resize: RawResize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPixelDistribution {
    #[serde(default = "default_transform")]
    transform: TransformKind,
    #[serde(default = "default_weight")]
    weight: f32,
    #[serde(default)]
    color_conversion: Option<ColorConversion>,
}

impl Default for RawPixelDistribution {
    fn default() -> Self {
        Self {
            transform: default_transform(),
            weight: default_weight(),
            color_conversion: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFourier {
    #[serde(default = "default_beta")]
    beta: f32,
}

impl Default for RawFourier {
    fn default() -> Self {
        Self {
            beta: default_beta(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHistogram {
    #[serde(default = "default_blend_ratio")]
    blend_ratio: f32,
}

impl Default for RawHistogram {
    fn default() -> Self {
        Self {
            blend_ratio: default_blend_ratio(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResize {
    #[serde(default = "default_interpolation")]
    interpolation: Interpolation,
}

impl Default for RawResize {
    fn default() -> Self {
        Self {
            interpolation: default_interpolation(),
        }
    }
}

fn default_transform() -> TransformKind {
    TransformKind::Pca
}

fn default_weight() -> f32 {
    0.5
}

fn default_beta() -> f32 {
    0.1
}

fn default_blend_ratio() -> f32 {
    0.5
}

fn default_interpolation() -> Interpolation {
    Interpolation::Area
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}
