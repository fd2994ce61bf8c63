//! Fittable statistical transformers over pixel matrices.
//!
//! A pixel matrix is an `N × C` array with one row per pixel and one column
//! per channel. Every transformer learns per-channel statistics in `fit` and
//! maps rows into and out of its normalized space.
//!
//! - [`MinMaxScaler`] - per-channel range to a fixed output interval
//! - [`StandardScaler`] - per-channel z-score
//! - [`Pca`] - orthogonal principal-component basis
//!
//! [`Transformer`] wraps the three behind one value, selected by
//! [`TransformKind`].

pub mod minmax;
pub mod pca;
pub mod standard;

use std::fmt::{self, Display};
use std::str::FromStr;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::error::{AdaptError, AdaptResult};

pub use minmax::MinMaxScaler;
pub use pca::Pca;
pub use standard::StandardScaler;

/// Fit / transform / inverse-transform capability over pixel matrices.
///
/// Transformers that carry an arbitrary orientation (a basis whose vectors may
/// come back negated) report it through [`orientation`](Self::orientation)
/// and produce consistently oriented copies through
/// [`aligned_to`](Self::aligned_to). The defaults describe transformers with
/// no such ambiguity.
pub trait StatTransformer: Clone {
    /// Human readable name used in error messages.
    fn name(&self) -> &'static str;

    fn is_fitted(&self) -> bool;

    /// Learn parameters from an `N × C` matrix.
    fn fit(&mut self, x: ArrayView2<'_, f64>) -> AdaptResult<()>;

    fn transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>>;

    fn inverse_transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>>;

    fn fit_transform(&mut self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Sign of the fitted orientation, `None` when the transformer has none.
    fn orientation(&self) -> Option<f64> {
        None
    }

    /// A copy of `self` oriented consistently with `other`.
    fn aligned_to(&self, _other: &Self) -> Self {
        self.clone()
    }
}

/// Transformer selector, parsed from `"pca"`, `"standard"` or `"minmax"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Pca,
    Standard,
    MinMax,
}

impl TransformKind {
    /// A fresh, unfitted transformer of this kind with default settings.
    pub fn build(self) -> Transformer {
        match self {
            TransformKind::Pca => Transformer::Pca(Pca::new()),
            TransformKind::Standard => Transformer::Standard(StandardScaler::new()),
            TransformKind::MinMax => Transformer::MinMax(MinMaxScaler::new()),
        }
    }
}

impl Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformKind::Pca => write!(f, "pca"),
            TransformKind::Standard => write!(f, "standard"),
            TransformKind::MinMax => write!(f, "minmax"),
        }
    }
}

impl FromStr for TransformKind {
    type Err = AdaptError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "pca" => Ok(TransformKind::Pca),
            "standard" => Ok(TransformKind::Standard),
            "minmax" => Ok(TransformKind::MinMax),
            other => Err(AdaptError::InvalidParameter {
                parameter: "transform_type".into(),
                value: other.into(),
                constraint: "expected one of pca, standard, minmax".into(),
            }),
        }
    }
}

/// One of the three transformer kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Transformer {
    MinMax(MinMaxScaler),
    Standard(StandardScaler),
    Pca(Pca),
}

impl Transformer {
    pub fn kind(&self) -> TransformKind {
        match self {
            Transformer::MinMax(_) => TransformKind::MinMax,
            Transformer::Standard(_) => TransformKind::Standard,
            Transformer::Pca(_) => TransformKind::Pca,
        }
    }
}

impl StatTransformer for Transformer {
    fn name(&self) -> &'static str {
        match self {
            Transformer::MinMax(t) => t.name(),
            Transformer::Standard(t) => t.name(),
            Transformer::Pca(t) => t.name(),
        }
    }

    fn is_fitted(&self) -> bool {
        match self {
            Transformer::MinMax(t) => t.is_fitted(),
            Transformer::Standard(t) => t.is_fitted(),
            Transformer::Pca(t) => t.is_fitted(),
        }
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>) -> AdaptResult<()> {
        match self {
            Transformer::MinMax(t) => t.fit(x),
            Transformer::Standard(t) => t.fit(x),
            Transformer::Pca(t) => t.fit(x),
        }
    }

    fn transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        match self {
            Transformer::MinMax(t) => t.transform(x),
            Transformer::Standard(t) => t.transform(x),
            Transformer::Pca(t) => t.transform(x),
        }
    }

    fn inverse_transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        match self {
            Transformer::MinMax(t) => t.inverse_transform(x),
            Transformer::Standard(t) => t.inverse_transform(x),
            Transformer::Pca(t) => t.inverse_transform(x),
        }
    }

    fn orientation(&self) -> Option<f64> {
        match self {
            Transformer::Pca(t) => t.orientation(),
            _ => None,
        }
    }

    fn aligned_to(&self, other: &Self) -> Self {
        match (self, other) {
            (Transformer::Pca(a), Transformer::Pca(b)) => Transformer::Pca(a.aligned_to(b)),
            _ => self.clone(),
        }
    }
}

/// Column count of `x` must equal the fitted feature count.
pub(crate) fn check_features(expected: usize, x: &ArrayView2<'_, f64>) -> AdaptResult<()> {
    if x.ncols() != expected {
        return Err(AdaptError::FeatureMismatch {
            expected,
            got: x.ncols(),
        });
    }
    Ok(())
}

pub(crate) fn check_fit_input(x: &ArrayView2<'_, f64>, transformer: &'static str) -> AdaptResult<()> {
    if x.nrows() == 0 || x.ncols() == 0 {
        return Err(AdaptError::EmptyInput {
            context: format!("{transformer}::fit"),
        });
    }
    Ok(())
}
