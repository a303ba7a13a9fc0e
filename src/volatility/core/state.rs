//! Terminal state of the in-sample volatility recursion.
//!
//! A [`VarianceState`] carries the last `L = max(p, o, q)` residuals and
//! conditional variances (oldest first). Forecasting continues the
//! recursion from it without touching the full sample again.
use ndarray::{Array1, ArrayView1, s};
use serde::Serialize;

use crate::errors::{RiskError, RiskResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VarianceState {
    /// Last `L` residuals `ε_t`, newest at the end.
    pub resid: Array1<f64>,
    /// Last `L` conditional variances `σ²_t`, newest at the end.
    pub variances: Array1<f64>,
}

impl VarianceState {
    /// Build a state from explicit lags.
    ///
    /// # Errors
    /// - `InvalidInput` if the lengths differ, any variance is not strictly
    ///   positive and finite, or any residual is non-finite.
    pub fn new(resid: Array1<f64>, variances: Array1<f64>) -> RiskResult<Self> {
        if resid.len() != variances.len() {
            return Err(RiskError::invalid_input(format!(
                "state lags differ in length: {} residuals vs {} variances",
                resid.len(),
                variances.len()
            )));
        }
        if resid.iter().any(|v| !v.is_finite()) {
            return Err(RiskError::invalid_input("state residuals must be finite"));
        }
        if variances.iter().any(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(RiskError::invalid_input(
                "state variances must be strictly positive and finite",
            ));
        }
        Ok(Self { resid, variances })
    }

    /// Take the last `lags` entries of a completed recursion.
    ///
    /// Requires `lags <= resid.len() == variances.len()`, which estimation
    /// guarantees through its minimum-length rule.
    pub(crate) fn from_tail(
        resid: ArrayView1<f64>, variances: ArrayView1<f64>, lags: usize,
    ) -> Self {
        let n = resid.len();
        Self {
            resid: resid.slice(s![n - lags..]).to_owned(),
            variances: variances.slice(s![n - lags..]).to_owned(),
        }
    }

    pub fn lags(&self) -> usize {
        self.resid.len()
    }

    pub fn last_variance(&self) -> Option<f64> {
        self.variances.last().copied()
    }

    pub fn last_squared_residual(&self) -> Option<f64> {
        self.resid.last().map(|e| e * e)
    }

    pub fn last_log_variance(&self) -> Option<f64> {
        self.last_variance().map(f64::ln)
    }
}
