//! Out-of-sample variance forecasts.
//!
//! Purpose
//! -------
//! Roll the fitted volatility recursion `h` steps past the sample, starting
//! from the terminal [`VarianceState`].
//!
//! Key behaviors
//! -------------
//! - GARCH: future squared shocks are replaced by their conditional
//!   expectation, `E[ε²_{T+k}] = σ²_{T+k}`.
//! - EGARCH: future standardized shocks enter at their expectation, so the
//!   `α` and `γ` terms vanish beyond the sample and the log-variance decays
//!   toward `ω / (1 − Σβ)`.
//! - No clamping. A variance that is not strictly positive and finite stops
//!   the forecast with `NumericalInstability { step, value }`, `step`
//!   counted from 1.
//!
//! Conventions
//! -----------
//! - `variances[k]` is the `(k + 1)`-step-ahead forecast `σ²_{T+k+1}`.
use ndarray::Array1;
use serde::Serialize;

use crate::{
    errors::{RiskError, RiskResult},
    volatility::core::{
        distribution::Distribution,
        params::{EgarchParams, GarchParams, VolatilityParams},
        state::VarianceState,
    },
};

/// Forecast path of conditional variances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub horizon: usize,
    /// `σ²_{T+1} .. σ²_{T+h}`.
    pub variances: Array1<f64>,
}

impl ForecastResult {
    /// Conditional volatilities `σ_{T+k}`.
    pub fn volatilities(&self) -> Array1<f64> {
        self.variances.mapv(f64::sqrt)
    }

    /// One-step-ahead variance `σ²_{T+1}`.
    pub fn one_step(&self) -> Option<f64> {
        self.variances.first().copied()
    }

    /// Variance at the forecast horizon `σ²_{T+h}`.
    pub fn terminal(&self) -> Option<f64> {
        self.variances.last().copied()
    }
}

/// Forecast `horizon` variances from `state`.
///
/// # Errors
/// - `InvalidParameter` if `horizon == 0`.
/// - `InvalidInput` if `state` holds fewer lags than the recursion needs.
/// - `NumericalInstability` at the first non-positive or non-finite
///   variance.
pub fn forecast_variance(
    params: &VolatilityParams, dist: &Distribution, state: &VarianceState, horizon: usize,
) -> RiskResult<ForecastResult> {
    if horizon == 0 {
        return Err(RiskError::invalid_parameter(
            "horizon",
            horizon,
            "Forecast horizon must be at least 1.",
        ));
    }
    let needed = match params {
        VolatilityParams::Garch(g) => g.alpha.len().max(g.beta.len()),
        VolatilityParams::Egarch(e) => e.alpha.len().max(e.gamma.len()).max(e.beta.len()),
    };
    if state.lags() < needed {
        return Err(RiskError::invalid_input(format!(
            "variance state holds {} lags but the recursion needs {needed}",
            state.lags()
        )));
    }
    let variances = match params {
        VolatilityParams::Garch(g) => garch_forecast(g, state, horizon)?,
        VolatilityParams::Egarch(e) => egarch_forecast(e, dist, state, horizon)?,
    };
    Ok(ForecastResult { horizon, variances })
}

// ---- Helper Methods ----

fn check_variance(step: usize, value: f64) -> RiskResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RiskError::NumericalInstability { step, value })
    }
}

fn garch_forecast(g: &GarchParams, state: &VarianceState, horizon: usize) -> RiskResult<Array1<f64>> {
    let l = state.lags();
    let mut e2: Vec<f64> = state.resid.iter().map(|e| e * e).collect();
    let mut var: Vec<f64> = state.variances.to_vec();
    e2.reserve(horizon);
    var.reserve(horizon);
    for k in 0..horizon {
        let t = l + k;
        let mut s2 = g.omega;
        for (i, a) in g.alpha.iter().enumerate() {
            s2 += a * e2[t - i - 1];
        }
        for (j, b) in g.beta.iter().enumerate() {
            s2 += b * var[t - j - 1];
        }
        let s2 = check_variance(k + 1, s2)?;
        var.push(s2);
        e2.push(s2);
    }
    Ok(Array1::from(var.split_off(l)))
}

fn egarch_forecast(
    e: &EgarchParams, dist: &Distribution, state: &VarianceState, horizon: usize,
) -> RiskResult<Array1<f64>> {
    let l = state.lags();
    let abs_mean = dist.expected_abs();
    let z: Vec<f64> =
        state.resid.iter().zip(state.variances.iter()).map(|(r, v)| r / v.sqrt()).collect();
    let mut log_var: Vec<f64> = state.variances.iter().map(|v| v.ln()).collect();
    let mut out = Array1::<f64>::zeros(horizon);
    for k in 0..horizon {
        let t = l + k;
        let mut acc = e.omega;
        for (i, a) in e.alpha.iter().enumerate() {
            if let Some(&zl) = z.get(t.wrapping_sub(i + 1)) {
                acc += a * (zl.abs() - abs_mean);
            }
        }
        for (m, g) in e.gamma.iter().enumerate() {
            if let Some(&zl) = z.get(t.wrapping_sub(m + 1)) {
                acc += g * zl;
            }
        }
        for (j, b) in e.beta.iter().enumerate() {
            acc += b * log_var[t - j - 1];
        }
        out[k] = check_variance(k + 1, acc.exp())?;
        log_var.push(acc);
    }
    Ok(out)
}
