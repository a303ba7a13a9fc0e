//! Fitted volatility-model result.
use ndarray::Array1;

use crate::{
    errors::RiskResult,
    optimization::loglik_optimizer::OptimOutcome,
    series::VolatilitySeries,
    volatility::core::{
        distribution::Distribution,
        forecasts::{ForecastResult, forecast_variance},
        orders::{VolatilityFamily, VolatilityOrders},
        params::VolatilityParams,
        state::VarianceState,
    },
};

/// Immutable outcome of
/// [`VolatilityModel::fit`](crate::volatility::VolatilityModel::fit).
///
/// Fields
/// ------
/// - `family`, `orders`: the model actually fitted (`o = 0` for GARCH).
/// - `params`, `distribution`: decoded coefficients and innovation law with
///   the estimated `ν` for Student-t.
/// - `coefficients` / `param_names`: natural vector `[ω, α, γ?, β, ν?]`.
/// - `conditional_volatility`: `σ_t` dated like the residuals.
/// - `state`: last `max(p, o, q)` residuals and variances for forecasting.
/// - `loglik`, `aic`, `bic`, `n_obs`: fit statistics on the residual scale.
/// - `std_errors`: observed-information standard errors of `coefficients`.
/// - `outcome`: optimizer diagnostics from the (internally rescaled) run.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityModelFit {
    pub family: VolatilityFamily,
    pub orders: VolatilityOrders,
    pub params: VolatilityParams,
    pub distribution: Distribution,
    pub coefficients: Array1<f64>,
    pub param_names: Vec<String>,
    pub conditional_volatility: VolatilitySeries,
    pub state: VarianceState,
    pub loglik: f64,
    pub aic: f64,
    pub bic: f64,
    pub n_obs: usize,
    pub std_errors: Option<Array1<f64>>,
    pub outcome: OptimOutcome,
}

impl VolatilityModelFit {
    /// Forecast `horizon` conditional variances from the terminal state.
    ///
    /// # Errors
    /// - See [`forecast_variance`].
    pub fn forecast(&self, horizon: usize) -> RiskResult<ForecastResult> {
        forecast_variance(&self.params, &self.distribution, &self.state, horizon)
    }

    pub fn persistence(&self) -> f64 {
        self.params.persistence()
    }

    /// Look up a coefficient by its label, e.g. `"alpha[1]"`.
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.param_names.iter().position(|n| n == name).map(|i| self.coefficients[i])
    }
}
