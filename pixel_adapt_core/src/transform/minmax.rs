use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use super::{check_features, check_fit_input, StatTransformer};
use crate::error::{AdaptError, AdaptResult};

/// Scales each channel from its fitted `[min, max]` to `[lo, hi]`.
///
/// `transform(x) = (x - data_min) / data_range * (hi - lo) + lo`
///
/// A constant channel has its range forced to 1, so it maps to `lo` and the
/// inverse recovers the constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    feature_range: (f64, f64),
    params: Option<MinMaxParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct MinMaxParams {
    data_min: Array1<f64>,
    data_max: Array1<f64>,
    data_range: Array1<f64>,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Scaler with output interval `[0, 1]`.
    pub fn new() -> Self {
        Self {
            feature_range: (0.0, 1.0),
            params: None,
        }
    }

    /// Scaler with output interval `[lo, hi]`; requires finite `lo < hi`.
    pub fn with_range(lo: f64, hi: f64) -> AdaptResult<Self> {
        if !lo.is_finite() || !hi.is_finite() || hi <= lo {
            return Err(AdaptError::InvalidParameter {
                parameter: "feature_range".into(),
                value: format!("({lo}, {hi})"),
                constraint: "bounds must be finite with lo < hi".into(),
            });
        }
        Ok(Self {
            feature_range: (lo, hi),
            params: None,
        })
    }

    pub fn feature_range(&self) -> (f64, f64) {
        self.feature_range
    }

    pub fn data_min(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|p| &p.data_min)
    }

    pub fn data_max(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|p| &p.data_max)
    }

    pub fn data_range(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|p| &p.data_range)
    }

    fn fitted(
        &self,
        x: &ArrayView2<'_, f64>,
        operation: &'static str,
    ) -> AdaptResult<&MinMaxParams> {
        let params = self.params.as_ref().ok_or(AdaptError::NotFitted {
            transformer: "MinMaxScaler",
            operation,
        })?;
        check_features(params.data_min.len(), x)?;
        Ok(params)
    }
}

impl StatTransformer for MinMaxScaler {
    fn name(&self) -> &'static str {
        "MinMaxScaler"
    }

    fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    fn fit(&mut self, x: ArrayView2<'_, f64>) -> AdaptResult<()> {
        check_fit_input(&x, self.name())?;
        let data_min = x.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| acc.min(v));
        let data_max = x.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| acc.max(v));
        let data_range = (&data_max - &data_min).mapv(|r| if r == 0.0 { 1.0 } else { r });
        self.params = Some(MinMaxParams {
            data_min,
            data_max,
            data_range,
        });
        Ok(())
    }

    fn transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        let params = self.fitted(&x, "transform")?;
        let (lo, hi) = self.feature_range;
        Ok((&x - &params.data_min) / &params.data_range * (hi - lo) + lo)
    }

    fn inverse_transform(&self, x: ArrayView2<'_, f64>) -> AdaptResult<Array2<f64>> {
        let params = self.fitted(&x, "inverse_transform")?;
        let (lo, hi) = self.feature_range;
        Ok((&x - lo) / (hi - lo) * &params.data_range + &params.data_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn fit_records_per_channel_extremes() {
        let x = array![[0.0, 10.0], [5.0, 30.0], [2.0, 20.0]];
        let mut scaler = MinMaxScaler::new();
        scaler.fit(x.view()).unwrap();
        assert_eq!(scaler.data_min().unwrap(), &array![0.0, 10.0]);
        assert_eq!(scaler.data_max().unwrap(), &array![5.0, 30.0]);
        assert_eq!(scaler.data_range().unwrap(), &array![5.0, 20.0]);
    }

    #[test]
    fn transform_maps_into_configured_interval() {
        let x = array![[0.0], [5.0], [10.0]];
        let mut scaler = MinMaxScaler::with_range(-1.0, 1.0).unwrap();
        let scaled = scaler.fit_transform(x.view()).unwrap();
        assert_eq!(scaled, array![[-1.0], [0.0], [1.0]]);
    }

    #[test]
    fn inverse_undoes_transform() {
        let x = array![[0.12, 0.5, 0.9], [0.3, 0.1, 0.2], [0.77, 0.65, 0.4]];
        let mut scaler = MinMaxScaler::with_range(0.2, 3.0).unwrap();
        let scaled = scaler.fit_transform(x.view()).unwrap();
        let restored = scaler.inverse_transform(scaled.view()).unwrap();
        for (a, b) in x.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn constant_channel_maps_to_lower_bound_and_back() {
        let x = array![[0.4, 1.0], [0.4, 2.0]];
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(x.view()).unwrap();
        assert_eq!(scaler.data_range().unwrap()[0], 1.0);
        assert_eq!(scaled[[0, 0]], 0.0);
        assert_eq!(scaled[[1, 0]], 0.0);
        let restored = scaler.inverse_transform(scaled.view()).unwrap();
        assert!((restored[[0, 0]] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn invalid_range_is_rejected() {
        assert!(MinMaxScaler::with_range(1.0, 1.0).is_err());
        assert!(MinMaxScaler::with_range(0.0, f64::NAN).is_err());
    }

    #[test]
    fn empty_matrix_cannot_be_fitted() {
        let x = Array2::<f64>::zeros((0, 3));
        let err = MinMaxScaler::new().fit(x.view()).unwrap_err();
        assert!(matches!(err, AdaptError::EmptyInput { .. }));
    }
}
