//! Estimation options for volatility models.
//!
//! [`VolatilityOptions`] bundles the optimizer settings, the variance
//! guards used by the in-sample recursion, the standard-error toggle and the
//! boundary tolerance that decides when a GARCH fit counts as
//! non-stationary. Components are validated by their own constructors;
//! only the boundary tolerance is checked here.
use crate::{
    errors::{RiskError, RiskResult},
    optimization::loglik_optimizer::MLEOptions,
    volatility::core::guards::VarianceGuards,
};

/// Default minimum GARCH slack `1 − margin − Σα − Σβ` accepted after a fit.
pub const DEFAULT_BOUNDARY_TOL: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityOptions {
    pub mle_opts: MLEOptions,
    pub guards: VarianceGuards,
    pub compute_std_errors: bool,
    /// Fits whose GARCH slack is below this are `NonStationary`.
    pub boundary_tol: f64,
}

impl VolatilityOptions {
    /// # Errors
    /// - `InvalidParameter` unless `0 <= boundary_tol < 1`.
    pub fn new(
        mle_opts: MLEOptions, guards: VarianceGuards, compute_std_errors: bool, boundary_tol: f64,
    ) -> RiskResult<Self> {
        if !(0.0..1.0).contains(&boundary_tol) {
            return Err(RiskError::invalid_parameter(
                "boundary_tol",
                boundary_tol,
                "Boundary tolerance must lie in [0, 1).",
            ));
        }
        Ok(Self { mle_opts, guards, compute_std_errors, boundary_tol })
    }
}

impl Default for VolatilityOptions {
    fn default() -> Self {
        Self {
            mle_opts: MLEOptions::default(),
            guards: VarianceGuards::default(),
            compute_std_errors: true,
            boundary_tol: DEFAULT_BOUNDARY_TOL,
        }
    }
}
