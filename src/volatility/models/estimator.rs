//! GARCH / EGARCH estimation by maximum likelihood.
//!
//! Purpose
//! -------
//! Fit a conditional-variance model to a residual series under Normal or
//! Student-t innovations and return an immutable [`VolatilityModelFit`].
//!
//! Key behaviors
//! -------------
//! - Residuals are divided by `s = sqrt(mean ε²)` before optimization; the
//!   fitted parameters are mapped back with
//!   [`VolatilityParams::rescale`], and the reported log-likelihood,
//!   volatilities and state are recomputed on the original scale.
//! - Optimization runs in unconstrained θ-space through [`maximize`]; see
//!   [`params`](crate::volatility::core::params) for the encodings.
//! - A GARCH fit whose slack falls below `boundary_tol` is returned as
//!   `NonStationary`, never as a fit.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residuals are treated as zero-mean innovations; no mean is estimated.
//! - Residual length `≥ max(p, o, q) + 1`, otherwise `InsufficientData`.
//! - Identically zero residuals are `InvalidInput` (no scale to model).
use ndarray::Array1;
use tracing::{debug, info, warn};

use crate::{
    errors::{RiskError, RiskResult},
    inference::calc_standard_errors,
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{LogLikelihood, Theta, maximize, validation::validate_theta},
    },
    series::{ResidualSeries, VolatilitySeries},
    volatility::{
        core::{
            distribution::{Distribution, DistributionKind},
            guards::VarianceGuards,
            options::VolatilityOptions,
            orders::{VolatilityFamily, VolatilityOrders},
            params::{START_NU, VolatilityParams},
            recursion::{average_loglik, backcast, conditional_variances},
            state::VarianceState,
        },
        models::fit::VolatilityModelFit,
    },
};

/// Residuals plus their backcast, as seen by the likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityData {
    pub eps: Array1<f64>,
    pub backcast: f64,
}

impl VolatilityData {
    pub fn new(eps: Array1<f64>) -> Self {
        let backcast = backcast(eps.view());
        Self { eps, backcast }
    }
}

/// Volatility estimator: family, orders, distribution and options.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityModel {
    pub family: VolatilityFamily,
    /// Effective orders (`o = 0` for GARCH).
    pub orders: VolatilityOrders,
    pub distribution: DistributionKind,
    pub options: VolatilityOptions,
}

impl VolatilityModel {
    /// # Errors
    /// - `InvalidParameter` for degenerate orders (see
    ///   [`VolatilityOrders::effective`]).
    pub fn new(
        family: VolatilityFamily, orders: VolatilityOrders, distribution: DistributionKind,
        options: VolatilityOptions,
    ) -> RiskResult<Self> {
        let orders = orders.effective(family)?;
        Ok(Self { family, orders, distribution, options })
    }

    /// Build from configuration names such as `("egarch", "t")`.
    ///
    /// # Errors
    /// - `InvalidParameter` for unknown names or degenerate orders.
    pub fn from_names(
        family: &str, orders: VolatilityOrders, distribution: &str, options: VolatilityOptions,
    ) -> RiskResult<Self> {
        Self::new(family.parse()?, orders, distribution.parse()?, options)
    }

    /// Fit the model to `residuals`.
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` if `residuals.len() < max(p, o, q) + 1`.
    /// - `InvalidInput` if every residual is zero.
    /// - `Convergence` if the optimizer fails or stops without converging.
    /// - `NonStationary` if a GARCH fit sits on the stability boundary.
    pub fn fit(&self, residuals: &ResidualSeries) -> RiskResult<VolatilityModelFit> {
        let label = self.family.label();
        let required = self.orders.min_observations();
        if residuals.len() < required {
            return Err(RiskError::InsufficientData {
                model: label,
                required,
                actual: residuals.len(),
            });
        }
        let raw = VolatilityData::new(residuals.values().to_owned());
        if raw.backcast <= f64::MIN_POSITIVE || !raw.backcast.is_finite() {
            return Err(RiskError::invalid_input(
                "residuals are identically zero; conditional variance is not identified",
            ));
        }
        let s2 = raw.backcast;
        let scaled = VolatilityData::new(raw.eps.mapv(|e| e / s2.sqrt()));

        let theta0 = self.initial_theta(1.0);
        debug!(family = label, orders = %self.orders, theta0 = ?theta0, "volatility starting values");
        let outcome = maximize(self, theta0, &scaled, &self.options.mle_opts)
            .map_err(|e| RiskError::from_optimizer(label, e))?;
        if !outcome.converged {
            return Err(RiskError::Convergence { model: label, reason: outcome.status.clone() });
        }

        let (unit_params, distribution) = VolatilityParams::from_theta(
            outcome.theta_hat.view(),
            self.family,
            &self.orders,
            self.distribution,
        )
        .map_err(|e| RiskError::from_optimizer(label, e))?;
        if let VolatilityParams::Garch(g) = &unit_params {
            if g.slack < self.options.boundary_tol {
                warn!(persistence = unit_params.persistence(), "GARCH fit on stability boundary");
                return Err(RiskError::NonStationary { persistence: unit_params.persistence() });
            }
        }
        let params = unit_params.rescale(s2);

        let guards = self.options.guards;
        let sigma2 =
            conditional_variances(&params, &distribution, raw.eps.view(), raw.backcast, &guards);
        let n_obs = raw.eps.len();
        let loglik = average_loglik(&params, &distribution, raw.eps.view(), raw.backcast, &guards)
            .map_err(|e| RiskError::from_optimizer(label, e))?
            * n_obs as f64;
        let state = VarianceState::from_tail(raw.eps.view(), sigma2.view(), self.orders.max_lag());
        let conditional_volatility =
            VolatilitySeries::new(residuals.dates().to_vec(), sigma2.mapv(f64::sqrt))?;

        let coefficients = params.to_natural(&distribution);
        let std_errors = if self.options.compute_std_errors {
            let f = |x: &Theta| self.natural_loglik(x, &raw, &guards);
            match calc_standard_errors(&f, &coefficients, n_obs) {
                Ok(se) => Some(se),
                Err(err) => {
                    warn!(family = label, error = %err, "volatility standard errors unavailable");
                    None
                }
            }
        } else {
            None
        };

        let k = coefficients.len() as f64;
        let aic = -2.0 * loglik + 2.0 * k;
        let bic = -2.0 * loglik + k * (n_obs as f64).ln();
        info!(
            family = label,
            orders = %self.orders,
            %distribution,
            loglik,
            persistence = params.persistence(),
            iterations = outcome.iterations,
            "volatility model fitted"
        );
        Ok(VolatilityModelFit {
            family: self.family,
            orders: self.orders,
            param_names: VolatilityParams::names(self.family, &self.orders, self.distribution),
            params,
            distribution,
            coefficients,
            conditional_volatility,
            state,
            loglik,
            aic,
            bic,
            n_obs,
            std_errors,
            outcome,
        })
    }

    // ---- Helper Methods ----

    fn initial_theta(&self, sample_var: f64) -> Theta {
        let params = VolatilityParams::initial(self.family, &self.orders, sample_var);
        let dist = match self.distribution {
            DistributionKind::Normal => Distribution::Normal,
            DistributionKind::StudentT => Distribution::StudentT { nu: START_NU },
        };
        params.to_theta(&dist)
    }

    fn natural_loglik(
        &self, natural: &Theta, data: &VolatilityData, guards: &VarianceGuards,
    ) -> OptResult<f64> {
        let (params, dist) = VolatilityParams::from_natural(
            natural.view(),
            self.family,
            &self.orders,
            self.distribution,
        )?;
        average_loglik(&params, &dist, data.eps.view(), data.backcast, guards)
    }
}

impl LogLikelihood for VolatilityModel {
    type Data = VolatilityData;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let (params, dist) =
            VolatilityParams::from_theta(theta.view(), self.family, &self.orders, self.distribution)?;
        average_loglik(&params, &dist, data.eps.view(), data.backcast, &self.options.guards)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(
            theta.view(),
            VolatilityParams::n_params(self.family, &self.orders, self.distribution),
        )?;
        let required = self.orders.min_observations();
        if data.eps.len() < required {
            return Err(OptError::ThetaLengthMismatch { expected: required, actual: data.eps.len() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optimization::loglik_optimizer::MLEOptions, series::TimeSeries};
    use chrono::{Duration, NaiveDate};
    use rand::{SeedableRng, distributions::Distribution as _, rngs::StdRng};
    use statrs::distribution::{Normal, StudentsT};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter recovery for GARCH(1,1) (Normal and Student-t) and a sign
    //   check for the EGARCH leverage term.
    // - Scale handling: fits on returns-sized data.
    // - Failure classes: InsufficientData, InvalidInput, InvalidParameter,
    //   NonStationary.
    // - Forecast continuity from the fitted state.
    // -------------------------------------------------------------------------

    fn dated(values: Array1<f64>) -> ResidualSeries {
        let start = NaiveDate::from_ymd_opt(2010, 1, 4).expect("valid date");
        let dates = (0..values.len()).map(|i| start + Duration::days(i as i64)).collect();
        TimeSeries::new(dates, values).expect("valid series")
    }

    /// Unit-variance innovations: standard Normal, or t(ν) scaled by
    /// sqrt((ν−2)/ν).
    fn innovations(n: usize, nu: Option<f64>, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        match nu {
            None => {
                let normal = Normal::new(0.0, 1.0).expect("valid normal");
                (0..n).map(|_| normal.sample(&mut rng)).collect()
            }
            Some(nu) => {
                let t = StudentsT::new(0.0, 1.0, nu).expect("valid t");
                let scale = ((nu - 2.0) / nu).sqrt();
                (0..n).map(|_| scale * t.sample(&mut rng)).collect()
            }
        }
    }

    fn simulate_garch11(
        n: usize, omega: f64, alpha: f64, beta: f64, nu: Option<f64>, seed: u64,
    ) -> Array1<f64> {
        let burn = 500;
        let z = innovations(n + burn, nu, seed);
        let mut s2 = omega / (1.0 - alpha - beta);
        let mut out = Vec::with_capacity(n + burn);
        for zt in z {
            let e = s2.sqrt() * zt;
            out.push(e);
            s2 = omega + alpha * e * e + beta * s2;
        }
        Array1::from(out.split_off(burn))
    }

    fn simulate_egarch11(
        n: usize, omega: f64, alpha: f64, gamma: f64, beta: f64, seed: u64,
    ) -> Array1<f64> {
        let burn = 500;
        let z = innovations(n + burn, None, seed);
        let abs_mean = (2.0 / std::f64::consts::PI).sqrt();
        let mut log_s2 = omega / (1.0 - beta);
        let mut out = Vec::with_capacity(n + burn);
        for zt in z {
            out.push((0.5 * log_s2).exp() * zt);
            log_s2 = omega + alpha * (zt.abs() - abs_mean) + gamma * zt + beta * log_s2;
        }
        Array1::from(out.split_off(burn))
    }

    fn garch(dist: DistributionKind) -> VolatilityModel {
        VolatilityModel::new(
            VolatilityFamily::Garch,
            VolatilityOrders::default(),
            dist,
            VolatilityOptions::default(),
        )
        .expect("valid model")
    }

    fn mean_and_sd(xs: &[f64]) -> (f64, f64) {
        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        (mean, var.sqrt())
    }

    #[test]
    // Purpose
    // -------
    // GARCH(1,1) with Normal innovations is recovered within sampling error,
    // on average over independent samples and with bounded spread.
    //
    // Given
    // -----
    // - Five independent samples of 4000 draws with ω = 0.05, α = 0.10,
    //   β = 0.85.
    //
    // Expect
    // ------
    // - Mean α̂ within 0.025, mean β̂ within 0.04, mean ω̂ in (0.03, 0.08).
    // - Every α̂ within 0.06 and β̂ within 0.10 of the truth; across-sample
    //   standard deviations below 0.04 (α̂) and 0.06 (β̂).
    // - σ_t for every residual, a one-lag state, finite standard errors.
    fn garch11_normal_recovers_parameters() {
        // Arrange
        let seeds = [42_u64, 7, 2024, 31337, 99];
        let model = garch(DistributionKind::Normal);

        // Act
        let mut fits = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let eps = dated(simulate_garch11(4000, 0.05, 0.10, 0.85, None, seed));
            let fit = model.fit(&eps).expect("GARCH fit should succeed");
            fits.push((eps, fit));
        }

        // Assert
        let coef = |name: &str| -> Vec<f64> {
            fits.iter().map(|(_, f)| f.coefficient(name).expect("coefficient present")).collect()
        };
        let (alphas, betas, omegas) = (coef("alpha[1]"), coef("beta[1]"), coef("omega"));
        let (alpha_mean, alpha_sd) = mean_and_sd(&alphas);
        let (beta_mean, beta_sd) = mean_and_sd(&betas);
        let (omega_mean, _) = mean_and_sd(&omegas);
        assert!((alpha_mean - 0.10).abs() < 0.025, "alphas = {alphas:?}");
        assert!((beta_mean - 0.85).abs() < 0.04, "betas = {betas:?}");
        assert!(omega_mean > 0.03 && omega_mean < 0.08, "omegas = {omegas:?}");
        assert!(alphas.iter().all(|a| (a - 0.10).abs() < 0.06), "alphas = {alphas:?}");
        assert!(betas.iter().all(|b| (b - 0.85).abs() < 0.10), "betas = {betas:?}");
        assert!(alpha_sd < 0.04 && beta_sd < 0.06, "sd α = {alpha_sd}, sd β = {beta_sd}");

        for (eps, fit) in &fits {
            assert!(fit.persistence() < 1.0);
            assert_eq!(fit.conditional_volatility.len(), 4000);
            assert_eq!(fit.conditional_volatility.dates(), eps.dates());
            assert_eq!(fit.state.lags(), 1);
            let se = fit.std_errors.as_ref().expect("standard errors");
            assert!(se.iter().all(|v| v.is_finite()));
        }
        let (_, first) = &fits[0];
        assert_eq!(first.orders, VolatilityOrders::new(1, 0, 1));
        assert_eq!(first.param_names, vec!["omega", "alpha[1]", "beta[1]"]);
    }

    #[test]
    // Purpose
    // -------
    // Fitting is scale equivariant: returns-sized residuals give the same
    // shock coefficients and an intercept scaled by the variance factor.
    //
    // Given
    // -----
    // - The previous simulation multiplied by 0.01.
    //
    // Expect
    // ------
    // - α̂, β̂ agree with the unit-scale fit to 1e-3; ω̂ ratio ≈ 1e-4;
    //   log-likelihoods differ by n·ln(0.01).
    fn garch_fit_is_scale_equivariant() {
        let raw = simulate_garch11(3000, 0.05, 0.10, 0.85, None, 7);
        let model = garch(DistributionKind::Normal);
        let unit = model.fit(&dated(raw.clone())).expect("unit-scale fit");
        let small = model.fit(&dated(raw.mapv(|e| 0.01 * e))).expect("small-scale fit");

        let a = |f: &VolatilityModelFit, n: &str| f.coefficient(n).expect("present");
        assert!((a(&unit, "alpha[1]") - a(&small, "alpha[1]")).abs() < 1e-3);
        assert!((a(&unit, "beta[1]") - a(&small, "beta[1]")).abs() < 1e-3);
        let ratio = a(&small, "omega") / a(&unit, "omega");
        assert!((ratio / 1e-4 - 1.0).abs() < 1e-2, "omega ratio = {ratio}");
        let shift = unit.loglik - small.loglik;
        assert!((shift - 3000.0 * 0.01_f64.ln()).abs() < 1e-3 * unit.loglik.abs().max(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Student-t degrees of freedom are estimated jointly and stay above 2.
    //
    // Given
    // -----
    // - 5000 GARCH(1,1) draws with unit-variance t(6) innovations.
    //
    // Expect
    // ------
    // - 3.5 < ν̂ < 12 and ν̂ > 2; the distribution carries the estimate.
    fn garch11_student_t_estimates_nu() {
        let eps = dated(simulate_garch11(5000, 0.05, 0.08, 0.88, Some(6.0), 99));
        let fit = garch(DistributionKind::StudentT).fit(&eps).expect("GARCH-t fit should succeed");
        let nu = fit.distribution.nu().expect("Student-t fit carries nu");
        assert!(nu > 3.5 && nu < 12.0, "nu = {nu}");
        assert_eq!(fit.coefficient("nu"), Some(nu));
    }

    #[test]
    // Purpose
    // -------
    // EGARCH(1,1,1) picks up the sign of the leverage term and a high
    // log-variance persistence.
    //
    // Given
    // -----
    // - 4000 draws with ω = −0.05, α = 0.15, γ = −0.08, β = 0.95.
    //
    // Expect
    // ------
    // - γ̂ < 0, |β̂ − 0.95| < 0.05, α̂ > 0.
    fn egarch111_recovers_leverage_sign() {
        let eps = dated(simulate_egarch11(4000, -0.05, 0.15, -0.08, 0.95, 2024));
        let model = VolatilityModel::new(
            VolatilityFamily::Egarch,
            VolatilityOrders::default(),
            DistributionKind::Normal,
            VolatilityOptions::default(),
        )
        .expect("valid model");
        let fit = model.fit(&eps).expect("EGARCH fit should succeed");
        let gamma = fit.coefficient("gamma[1]").expect("gamma present");
        let beta = fit.coefficient("beta[1]").expect("beta present");
        let alpha = fit.coefficient("alpha[1]").expect("alpha present");
        assert!(gamma < 0.0, "gamma = {gamma}");
        assert!((beta - 0.95).abs() < 0.05, "beta = {beta}");
        assert!(alpha > 0.0, "alpha = {alpha}");

        let fc = fit.forecast(5).expect("EGARCH forecast");
        assert!(fc.variances.iter().all(|v| v.is_finite() && *v > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // The one-step forecast continues the in-sample recursion.
    //
    // Given
    // -----
    // - A GARCH(1,1) fit on simulated data.
    //
    // Expect
    // ------
    // - σ²_{T+1} = ω + α ε²_T + β σ²_T from the fitted state.
    fn one_step_forecast_continues_recursion() {
        let eps = dated(simulate_garch11(1500, 0.05, 0.10, 0.85, None, 3));
        let fit = garch(DistributionKind::Normal).fit(&eps).expect("fit");
        let fc = fit.forecast(1).expect("forecast");
        let omega = fit.coefficient("omega").expect("omega");
        let alpha = fit.coefficient("alpha[1]").expect("alpha");
        let beta = fit.coefficient("beta[1]").expect("beta");
        let e_t = *eps.values().last().expect("non-empty");
        let s_t = *fit.conditional_volatility.values().last().expect("non-empty");
        let expected = omega + alpha * e_t * e_t + beta * s_t * s_t;
        assert!((fc.variances[0] - expected).abs() < 1e-10 * expected.max(1.0));
    }

    #[test]
    // Purpose
    // -------
    // Residual series shorter than `max(p, o, q) + 1` are rejected.
    //
    // Given
    // -----
    // - GARCH(2, 0, 3) and three residuals.
    //
    // Expect
    // ------
    // - `InsufficientData { model: "GARCH", required: 4, actual: 3 }`.
    fn short_series_is_insufficient_data() {
        let model = VolatilityModel::new(
            VolatilityFamily::Garch,
            VolatilityOrders::new(2, 0, 3),
            DistributionKind::Normal,
            VolatilityOptions::default(),
        )
        .expect("valid model");
        let eps = dated(Array1::from(vec![0.1, -0.2, 0.3]));
        assert_eq!(
            model.fit(&eps),
            Err(RiskError::InsufficientData { model: "GARCH", required: 4, actual: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // All-zero residuals have no scale to model.
    //
    // Given
    // -----
    // - 50 zeros.
    //
    // Expect
    // ------
    // - `InvalidInput`.
    fn zero_residuals_are_invalid_input() {
        let eps = dated(Array1::zeros(50));
        assert!(matches!(
            garch(DistributionKind::Normal).fit(&eps),
            Err(RiskError::InvalidInput { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Unknown family or distribution names are configuration errors.
    //
    // Given
    // -----
    // - ("tgarch", "normal") and ("garch", "skewt").
    //
    // Expect
    // ------
    // - `InvalidParameter` named after the offending field.
    fn unknown_names_are_invalid_parameter() {
        let orders = VolatilityOrders::default();
        let err = VolatilityModel::from_names("tgarch", orders, "normal", VolatilityOptions::default())
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { name: "volatility_family", .. }));
        let err = VolatilityModel::from_names("garch", orders, "skewt", VolatilityOptions::default())
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter { name: "distribution", .. }));
    }

    #[test]
    // Purpose
    // -------
    // A fit whose slack is below the boundary tolerance is surfaced as
    // non-stationary.
    //
    // Given
    // -----
    // - Integrated GARCH data (α + β = 1) and a boundary tolerance of 0.03.
    //
    // Expect
    // ------
    // - `NonStationary` with persistence close to one.
    fn boundary_fit_is_non_stationary() {
        let eps = dated(simulate_igarch(3000, 0.01, 0.12, 17));
        let options = VolatilityOptions::new(
            MLEOptions::default(),
            VarianceGuards::default(),
            false,
            0.03,
        )
        .expect("valid options");
        let model = VolatilityModel::new(
            VolatilityFamily::Garch,
            VolatilityOrders::default(),
            DistributionKind::Normal,
            options,
        )
        .expect("valid model");
        match model.fit(&eps) {
            Err(RiskError::NonStationary { persistence }) => {
                assert!(persistence > 0.96, "persistence = {persistence}");
            }
            other => panic!("expected NonStationary, got {other:?}"),
        }
    }

    fn simulate_igarch(n: usize, omega: f64, alpha: f64, seed: u64) -> Array1<f64> {
        let z = innovations(n, None, seed);
        let mut s2: f64 = 1.0;
        let mut out = Vec::with_capacity(n);
        for zt in z {
            let e = s2.sqrt() * zt;
            out.push(e);
            s2 = omega + alpha * e * e + (1.0 - alpha) * s2;
        }
        Array1::from(out)
    }
}
