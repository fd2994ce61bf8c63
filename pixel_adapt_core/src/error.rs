//! Error types for adaptation operations
//!
//! Every precondition violation is reported before any computation starts.
//! Degenerate statistics (constant channels) are not errors; the transformers
//! substitute safe defaults for those.

use std::fmt;

use crate::color::ColorConversion;
use crate::image::PixelDepth;

/// Result type alias for adaptation operations
pub type AdaptResult<T> = Result<T, AdaptError>;

/// Error type shared by transformers, the domain adapter and the entry points
#[derive(Debug, Clone, PartialEq)]
pub enum AdaptError {
    /// Source and reference use different sample representations
    DepthMismatch {
        image: PixelDepth,
        reference: PixelDepth,
    },

    /// Source and reference carry a different number of channels
    ChannelMismatch {
        expected: usize,
        got: usize,
        context: String,
    },

    /// Shapes must match exactly and no resize is attempted
    ShapeMismatch {
        expected: (usize, usize, usize),
        got: (usize, usize, usize),
        context: String,
    },

    /// `transform` / `inverse_transform` called before `fit`
    NotFitted {
        transformer: &'static str,
        operation: &'static str,
    },

    /// Matrix column count differs from the fitted feature count
    FeatureMismatch { expected: usize, got: usize },

    /// Zero pixels, zero samples or zero-sized dimensions
    EmptyInput { context: String },

    /// Invalid parameter value
    InvalidParameter {
        parameter: String,
        value: String,
        constraint: String,
    },

    /// Color conversion applied to an image it cannot handle
    UnsupportedConversion {
        conversion: ColorConversion,
        channels: usize,
    },

    /// Array could not be reshaped into the requested layout
    Layout { details: String },

    /// Eigendecomposition of a covariance matrix failed
    Decomposition { details: String },
}

impl fmt::Display for AdaptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdaptError::DepthMismatch { image, reference } => write!(
                f,
                "Input image and reference image must have the same dtype: image is {}, reference is {}",
                image, reference
            ),
            AdaptError::ChannelMismatch {
                expected,
                got,
                context,
            } => write!(
                f,
                "Channel mismatch in {}: expected {} channels, got {}",
                context, expected, got
            ),
            AdaptError::ShapeMismatch {
                expected,
                got,
                context,
            } => write!(
                f,
                "Shape mismatch in {}: expected {:?}, got {:?}",
                context, expected, got
            ),
            AdaptError::NotFitted {
                transformer,
                operation,
            } => write!(
                f,
                "This {} instance is not fitted yet: call 'fit' before '{}'",
                transformer, operation
            ),
            AdaptError::FeatureMismatch { expected, got } => write!(
                f,
                "Feature mismatch: transformer was fitted on {} features, got {}",
                expected, got
            ),
            AdaptError::EmptyInput { context } => write!(f, "Empty input in {}", context),
            AdaptError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => write!(
                f,
                "Invalid parameter '{}' = {}: {}",
                parameter, value, constraint
            ),
            AdaptError::UnsupportedConversion {
                conversion,
                channels,
            } => write!(
                f,
                "Color conversion {:?} requires 3 channels, image has {}",
                conversion, channels
            ),
            AdaptError::Layout { details } => write!(f, "Invalid array layout: {}", details),
            AdaptError::Decomposition { details } => {
                write!(f, "Eigendecomposition failed: {}", details)
            }
        }
    }
}

impl std::error::Error for AdaptError {}

impl From<ndarray::ShapeError> for AdaptError {
    fn from(err: ndarray::ShapeError) -> Self {
        AdaptError::Layout {
            details: err.to_string(),
        }
    }
}
