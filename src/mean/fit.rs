//! Fitted mean-model result.
use ndarray::Array1;

use crate::{
    mean::{order::ArimaOrder, params::ArimaParams},
    optimization::loglik_optimizer::OptimOutcome,
    series::ResidualSeries,
};

/// Immutable outcome of [`ArimaModel::fit`](crate::mean::ArimaModel::fit).
///
/// Fields
/// ------
/// - `order`: the fitted `(p, d, q)`.
/// - `params`: decoded coefficients.
/// - `coefficients` / `param_names`: natural parameter vector
///   `[const?, ar.L1.., ma.L1.., sigma2]` and its labels.
/// - `residuals`: one-step-ahead prediction errors dated like the
///   differenced series (the first `d` input dates are dropped).
/// - `loglik`: total conditional log-likelihood over `n_obs` terms.
/// - `aic`, `bic`: information criteria from `loglik`.
/// - `std_errors`: observed-information standard errors of `coefficients`,
///   `None` when disabled or not computable.
/// - `outcome`: raw optimizer diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanModelFit {
    pub order: ArimaOrder,
    pub params: ArimaParams,
    pub coefficients: Array1<f64>,
    pub param_names: Vec<String>,
    pub residuals: ResidualSeries,
    pub loglik: f64,
    pub aic: f64,
    pub bic: f64,
    pub n_obs: usize,
    pub std_errors: Option<Array1<f64>>,
    pub outcome: OptimOutcome,
}

impl MeanModelFit {
    /// Assemble a fit and derive the information criteria.
    pub fn new(
        order: ArimaOrder, params: ArimaParams, residuals: ResidualSeries, loglik: f64,
        n_obs: usize, std_errors: Option<Array1<f64>>, outcome: OptimOutcome,
    ) -> Self {
        let coefficients = params.to_natural(&order);
        let k = coefficients.len() as f64;
        let aic = -2.0 * loglik + 2.0 * k;
        let bic = -2.0 * loglik + k * (n_obs.max(1) as f64).ln();
        Self {
            param_names: ArimaParams::names(&order),
            order,
            params,
            coefficients,
            residuals,
            loglik,
            aic,
            bic,
            n_obs,
            std_errors,
            outcome,
        }
    }
}
