use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::{check_features, check_fit_input, StatTransformer};
use crate::error::{AdaptError, AdaptResult};

/// Per-channel z-score: `(x - mean) / scale` with `scale = sqrt(population variance)`.
///
/// A constant channel has its scale forced to 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    params: Option<StandardParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StandardParams {
    mean: Array1<f64>,
    variance: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new() -> Self {
        Self { params: None }
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|p| &p.mean)
    }

    pub fn variance(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|p| &p.variance)
    }

    pub fn scale(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|p| &p.scale)
    }

    fn fitted(
        &self,
        x: &ArrayView2<'_, f64>,
        operation: &'static str,
    ) -> AdaptResult<&StandardParams> {
        let params = self.params.as_ref().ok_or(AdaptError::NotFitted {
            transformer: "StandardScaler",
            operation,
        })?;
        check_features(params.mean.len(), x)?;
        Ok(params)
    }
}

impl StatTransformer for StandardScaler {
    fn name(&self) -> &'static str {
        "StandardScaler"
    }

    fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>) -> AdaptResult<()> {
        check_fit_input(&x, self.name())?;
        let mean = x.mean_axis(Axis(0)).ok_or_else(|| AdaptError::EmptyInput {
            context: "StandardScaler::fit".into(),
        })?;
        let variance = x.var_axis(Axis(0), 0.0);
        let scale = variance.mapv(|v| {
            let s = v.sqrt();
            if s == 0.0 {
                1.0
            } else {
                s
            }
        });
        self.params = Some(StandardParams {
            mean,
            variance,
            scale,
        });
        Ok(())
    }

    fn transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        let params = self.fitted(&x, "transform")?;
        Ok((&x - &params.mean) / &params.scale)
    }

    fn inverse_transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        let params = self.fitted(&x, "inverse_transform")?;
        Ok(&x * &params.scale + &params.mean)
    }
}
