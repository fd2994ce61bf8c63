//! Principal-component projection with an explicit orientation.
//!
//! All `C` components are kept, so `inverse_transform(transform(x))` is exact
//! up to floating point. The basis returned by the eigendecomposition has an
//! arbitrary sign per vector; [`Pca::orientation`] exposes the sign of the
//! basis trace so two independently fitted instances can be aligned before
//! one's projection is inverted through the other.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use ndarray_linalg::{Eigh, UPLO};
use serde::{Deserialize, Serialize};

use super::{check_features, check_fit_input, StatTransformer};
use crate::error::{AdaptError, AdaptResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pca {
    model: Option<PcaModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PcaModel {
    mean: Array1<f64>,
    /// One basis vector per row, ordered by decreasing explained variance.
    components: Array2<f64>,
    explained_variance: Array1<f64>,
}

impl Pca {
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.model.as_ref().map(|m| &m.mean)
    }

    /// `C × C` basis, one component per row.
    pub fn components(&self) -> Option<&Array2<f64>> {
        self.model.as_ref().map(|m| &m.components)
    }

    pub fn explained_variance(&self) -> Option<&Array1<f64>> {
        self.model.as_ref().map(|m| &m.explained_variance)
    }

    /// Copy with every basis vector negated.
    pub fn negated(&self) -> Self {
        let mut flipped = self.clone();
        if let Some(model) = flipped.model.as_mut() {
            model.components.mapv_inplace(|v| -v);
        }
        flipped
    }

    fn fitted(&self, x: &ArrayView2<'_, f64>, operation: &'static str) -> AdaptResult<&PcaModel> {
        let model = self.model.as_ref().ok_or(AdaptError::NotFitted {
            transformer: "PCA",
            operation,
        })?;
        check_features(model.mean.len(), x)?;
        Ok(model)
    }
}

impl StatTransformer for Pca {
    fn name(&self) -> &'static str {
        "PCA"
    }

    fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>) -> AdaptResult<()> {
        check_fit_input(&x, self.name())?;
        let mean = x.mean_axis(Axis(0)).ok_or_else(|| AdaptError::EmptyInput {
            context: "PCA::fit".into(),
        })?;
        let centered = &x - &mean;
        let denominator = x.nrows().saturating_sub(1).max(1) as f64;
        let covariance = centered.t().dot(&centered) / denominator;

        let (eigenvalues, eigenvectors) =
            covariance
                .eigh(UPLO::Upper)
                .map_err(|err| AdaptError::Decomposition {
                    details: err.to_string(),
                })?;

        // eigh returns ascending eigenvalues with vectors as columns
        let mut pairs: Vec<(f64, Array1<f64>)> = eigenvalues
            .iter()
            .copied()
            .zip(eigenvectors.columns().into_iter().map(|col| col.to_owned()))
            .collect();
        pairs.sort_by(|(a, _), (b, _)| b.total_cmp(a));

        let mut components = Array2::<f64>::zeros(covariance.raw_dim());
        for (mut row, (_, vector)) in components.rows_mut().into_iter().zip(&pairs) {
            row.assign(vector);
        }
        let explained_variance: Array1<f64> = pairs.iter().map(|(v, _)| v.max(0.0)).collect();
        tracing::trace!("PCA explained variance {:?}", explained_variance);

        self.model = Some(PcaModel {
            mean,
            components,
            explained_variance,
        });
        Ok(())
    }

    fn transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        let model = self.fitted(&x, "transform")?;
        Ok((&x - &model.mean).dot(&model.components.t()))
    }

    fn inverse_transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        let model = self.fitted(&x, "inverse_transform")?;
        Ok(x.dot(&model.components) + &model.mean)
    }

    /// Sign of the basis trace: `1.0`, `-1.0`, or `0.0` for a zero trace.
    fn orientation(&self) -> Option<f64> {
        let model = self.model.as_ref()?;
        let trace = model.components.diag().sum();
        Some(if trace == 0.0 { 0.0 } else { trace.signum() })
    }

    fn aligned_to(&self, other: &Self) -> Self {
        match (self.orientation(), other.orientation()) {
            (Some(mine), Some(theirs)) if mine != theirs => self.negated(),
            _ => self.clone(),
        }
    }
}
