//! ARIMA(p, d, q) estimation by conditional Gaussian maximum likelihood.
//!
//! Purpose
//! -------
//! Fit the conditional-mean model whose one-step-ahead prediction errors
//! feed the volatility stage.
//!
//! Key behaviors
//! -------------
//! - [`ArimaModel::fit`] differences the input `d` times, builds a
//!   stationarity-respecting start (see [`init`](crate::mean::init)),
//!   maximizes the average conditional log-likelihood through
//!   [`maximize`], and returns an immutable [`MeanModelFit`].
//! - [`conditional_residuals`] runs the ARMA recursion
//!   `e_t = (y_t − c) − Σ φ_i (y_{t−i} − c) − Σ ψ_j e_{t−j}` with zero
//!   pre-sample deviations and errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Input length `≥ p + d + q + 1`, otherwise `InsufficientData`.
//! - The first `p` differenced observations condition the recursion; the
//!   likelihood sums over the remaining `n − d − p` errors.
//! - An optimizer run that ends without reporting convergence is a
//!   `Convergence` error, never a partial fit.
//!
//! Testing notes
//! -------------
//! - Simulated AR(1), ARIMA(1,1,0) and MA(1) series check coefficient
//!   recovery; edge tests check the minimum-length rule and constant input.
use ndarray::{Array1, ArrayView1};
use tracing::{debug, info, warn};

use crate::{
    errors::{RiskError, RiskResult},
    inference::calc_standard_errors,
    mean::{
        fit::MeanModelFit,
        init::initial_theta,
        order::{ArimaOrder, difference},
        params::ArimaParams,
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize, validation::validate_theta},
    },
    series::{ResidualSeries, TimeSeries},
};

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Estimation options for the mean model.
///
/// - `mle_opts`: optimizer tolerances and line search.
/// - `compute_std_errors`: attach observed-information standard errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaOptions {
    pub mle_opts: MLEOptions,
    pub compute_std_errors: bool,
}

impl ArimaOptions {
    pub fn new(mle_opts: MLEOptions, compute_std_errors: bool) -> Self {
        Self { mle_opts, compute_std_errors }
    }
}

impl Default for ArimaOptions {
    fn default() -> Self {
        Self { mle_opts: MLEOptions::default(), compute_std_errors: true }
    }
}

/// ARIMA estimator: an order plus options. Holds no fitted state; every
/// call to [`ArimaModel::fit`] returns a fresh [`MeanModelFit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArimaModel {
    pub order: ArimaOrder,
    pub options: ArimaOptions,
}

impl ArimaModel {
    pub fn new(order: ArimaOrder, options: ArimaOptions) -> Self {
        Self { order, options }
    }

    /// Fit the model to `series`.
    ///
    /// Parameters
    /// ----------
    /// - `series`: observations to model (returns in the pipeline).
    ///
    /// Returns
    /// -------
    /// A [`MeanModelFit`] whose residuals are dated from `series.dates()[d]`
    /// onward.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` if `series.len() < p + d + q + 1`.
    /// - `InvalidInput` if the differenced series has zero variance.
    /// - `Convergence` if the optimizer fails or stops without converging.
    pub fn fit(&self, series: &TimeSeries) -> RiskResult<MeanModelFit> {
        let order = self.order;
        let required = order.min_observations();
        if series.len() < required {
            return Err(RiskError::InsufficientData {
                model: "ARIMA",
                required,
                actual: series.len(),
            });
        }
        let y = difference(series.values().view(), order.d);
        let m = y.len() as f64;
        let mean = y.sum() / m;
        let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / m;
        if var <= f64::MIN_POSITIVE {
            return Err(RiskError::invalid_input(
                "series is constant after differencing; innovation variance is not identified",
            ));
        }

        let theta0 = initial_theta(&order, y.view());
        debug!(%order, theta0 = ?theta0, "ARIMA starting values");
        let outcome = maximize(self, theta0, &y, &self.options.mle_opts)
            .map_err(|e| RiskError::from_optimizer("ARIMA", e))?;
        if !outcome.converged {
            return Err(RiskError::Convergence { model: "ARIMA", reason: outcome.status.clone() });
        }

        let params = ArimaParams::from_theta(outcome.theta_hat.view(), &order)
            .map_err(|e| RiskError::from_optimizer("ARIMA", e))?;
        let resid = conditional_residuals(&params, y.view());
        let residuals = ResidualSeries::new(series.dates()[order.d..].to_vec(), resid)?;
        let n_obs = y.len() - order.p;
        let loglik = outcome.value * n_obs as f64;

        let std_errors = if self.options.compute_std_errors {
            let natural = params.to_natural(&order);
            let f = |x: &Theta| natural_loglik(&order, x, y.view());
            match calc_standard_errors(&f, &natural, n_obs) {
                Ok(se) => Some(se),
                Err(err) => {
                    warn!(%order, error = %err, "ARIMA standard errors unavailable");
                    None
                }
            }
        } else {
            None
        };

        info!(
            %order,
            loglik,
            iterations = outcome.iterations,
            coefficients = ?params.to_natural(&order),
            "ARIMA fitted"
        );
        Ok(MeanModelFit::new(order, params, residuals, loglik, n_obs, std_errors, outcome))
    }
}

impl LogLikelihood for ArimaModel {
    type Data = Array1<f64>;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = ArimaParams::from_theta(theta.view(), &self.order)?;
        average_loglik(&params, self.order.p, data.view())
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.order.n_params())?;
        if data.len() <= self.order.p {
            return Err(OptError::ThetaLengthMismatch {
                expected: self.order.p + 1,
                actual: data.len(),
            });
        }
        Ok(())
    }
}

/// One-step-ahead prediction errors for every index of `y`.
pub fn conditional_residuals(params: &ArimaParams, y: ArrayView1<f64>) -> Array1<f64> {
    let p = params.ar.len();
    let q = params.ma.len();
    let c = params.constant;
    let mut e = Array1::<f64>::zeros(y.len());
    for t in 0..y.len() {
        let mut pred = 0.0;
        for i in 1..=p.min(t) {
            pred += params.ar[i - 1] * (y[t - i] - c);
        }
        for j in 1..=q.min(t) {
            pred += params.ma[j - 1] * e[t - j];
        }
        e[t] = (y[t] - c) - pred;
    }
    e
}

// ---- Helper Methods ----

/// Average Gaussian log-likelihood of the errors after the first `p`.
fn average_loglik(params: &ArimaParams, p: usize, y: ArrayView1<f64>) -> OptResult<f64> {
    let e = conditional_residuals(params, y);
    let n = (y.len() - p) as f64;
    let sse: f64 = e.iter().skip(p).map(|v| v * v).sum();
    let value = -0.5 * (LN_2PI + params.sigma2.ln()) - 0.5 * sse / (n * params.sigma2);
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(value)
}

/// Average log-likelihood as a function of the natural parameter vector,
/// used for standard errors.
fn natural_loglik(order: &ArimaOrder, natural: &Theta, y: ArrayView1<f64>) -> OptResult<f64> {
    let params = ArimaParams::from_natural(natural.view(), order)?;
    average_loglik(&params, order.p, y)
}
