//! # Pixel Adapt Core
//!
//! Pixel-statistics domain adaptation for images. Given a source image and a
//! reference image, each entry point returns a copy of the source whose
//! low-level statistics follow the reference while its spatial content is
//! kept:
//!
//! - [`adapt_pixel_distribution`] - global color distribution through a
//!   fitted PCA, z-score or min-max transformer
//! - [`fourier_domain_adaptation`] - low-frequency amplitude swap in the
//!   Fourier domain
//! - [`apply_histogram`] - per-channel histogram specification
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::Array3;
//! use pixel_adapt_core::{adapt_pixel_distribution, apply_histogram, Image, TransformKind};
//!
//! let image = Image::from_u8(Array3::from_shape_fn((16, 16, 3), |(y, x, c)| {
//!     (y * 8 + x * 4 + c * 10) as u8
//! }));
//! let reference = Image::from_u8(Array3::from_elem((32, 24, 3), 180));
//!
//! let adapted = adapt_pixel_distribution(&image, &reference, TransformKind::Standard, 0.5).unwrap();
//! assert_eq!(adapted.shape(), image.shape());
//!
//! let matched = apply_histogram(&image, &reference, 1.0).unwrap();
//! assert!(matched.as_u8().unwrap().iter().all(|&v| v == 180));
//! ```
//!
//! ## Core Modules
//!
//! - [`transform`] - fittable statistical transformers
//! - [`adapter`] - reference-fitted statistics transfer
//! - [`image`] - image container, resize and blend helpers
//! - [`config`] - adaptation parameters via TOML
//! - [`logging`] - JSON line-delimited adaptation journal

pub mod adapter;
pub mod color;
pub mod config;
pub mod error;
pub mod histogram;
pub mod image;
pub mod logging;
pub mod pixel_distribution;
pub mod spectral;
pub mod transform;

pub use adapter::DomainAdapter;
pub use color::{convert, ColorConversion, ColorConversionPair};
pub use config::{
    AdaptationConfig, ConfigError, FourierConfig, HistogramConfig, PixelDistributionConfig,
};
pub use error::{AdaptError, AdaptResult};
pub use histogram::{apply_histogram, match_cumulative_cdf, match_histograms};
pub use image::{resize, Image, Interpolation, PixelDepth};
pub use logging::{log_adaptation, AdaptationLogEntry};
pub use pixel_distribution::{adapt_pixel_distribution, adapt_pixel_distribution_with};
pub use spectral::{fourier_domain_adaptation, AmplitudeWindow};
pub use transform::{
    MinMaxScaler, Pca, StandardScaler, StatTransformer, TransformKind, Transformer,
};
