//! Parametric Value-at-Risk and Expected Shortfall.
//!
//! Purpose
//! -------
//! Convert a forecasted variance into loss magnitudes at a confidence level
//! under the fitted innovation law.
//!
//! Key behaviors
//! -------------
//! - `z = F⁻¹(c)` from the unit-variance law, `σ = sqrt(σ²)`.
//! - `VaR = z·σ`.
//! - Normal: `ES = φ(z) / (1 − c) · σ`.
//! - Student-t: `ES = f(z) / (1 − c) · (ν − 2 + z²) / (ν − 1) · σ`, with
//!   `f` the unit-variance t density. This is the textbook
//!   `t_pdf(t)/(1 − c)·(ν + t²)/(ν − 1)` for the raw quantile `t`,
//!   rescaled by `sqrt((ν − 2)/ν)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Results are positive loss magnitudes for `σ² > 0` and `c` above one
//!   half.
//! - `σ²` is the variance of the innovation, so Student-t metrics need
//!   `ν > 2`; `VaR_c` is then exceeded with probability `1 − c` under the
//!   fitted model.
use serde::Serialize;

use crate::{
    errors::{RiskError, RiskResult},
    risk::confidence::ConfidenceLevel,
    volatility::{Distribution, ForecastResult},
};

/// VaR and ES at one confidence level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskMetrics {
    pub var: f64,
    pub es: f64,
    pub confidence: ConfidenceLevel,
}

/// Risk calculator bound to a distribution and confidence level.
///
/// Validates `ν` once at construction and caches the quantile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetricCalculator {
    distribution: Distribution,
    confidence: ConfidenceLevel,
    z: f64,
}

impl RiskMetricCalculator {
    /// # Errors
    /// - `InvalidParameter` if the distribution is Student-t with `ν ≤ 2`
    ///   or non-finite `ν`.
    pub fn new(distribution: Distribution, confidence: ConfidenceLevel) -> RiskResult<Self> {
        if let Distribution::StudentT { nu } = distribution {
            if !nu.is_finite() || nu <= 2.0 {
                return Err(RiskError::invalid_parameter(
                    "nu",
                    nu,
                    "Student-t risk metrics need degrees of freedom greater than 2.",
                ));
            }
        }
        let z = distribution.quantile(confidence.value())?;
        Ok(Self { distribution, confidence, z })
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// The `c`-quantile of the unit-variance law.
    pub fn quantile(&self) -> f64 {
        self.z
    }

    /// `VaR = z·σ`.
    ///
    /// # Errors
    /// - `InvalidInput` if `sigma2` is negative or non-finite.
    pub fn value_at_risk(&self, sigma2: f64) -> RiskResult<f64> {
        Ok(self.z * checked_sigma(sigma2)?)
    }

    /// Expected Shortfall for variance `sigma2`.
    ///
    /// # Errors
    /// - `InvalidInput` if `sigma2` is negative or non-finite.
    pub fn expected_shortfall(&self, sigma2: f64) -> RiskResult<f64> {
        let sigma = checked_sigma(sigma2)?;
        let tail = self.confidence.tail();
        let density = self.distribution.density(self.z)?;
        let es = match self.distribution {
            Distribution::Normal => density / tail * sigma,
            Distribution::StudentT { nu } => {
                density / tail * (nu - 2.0 + self.z * self.z) / (nu - 1.0) * sigma
            }
        };
        Ok(es)
    }

    pub fn metrics(&self, sigma2: f64) -> RiskResult<RiskMetrics> {
        Ok(RiskMetrics {
            var: self.value_at_risk(sigma2)?,
            es: self.expected_shortfall(sigma2)?,
            confidence: self.confidence,
        })
    }

    /// Metrics at every step of a forecast path.
    pub fn metrics_path(&self, forecast: &ForecastResult) -> RiskResult<Vec<RiskMetrics>> {
        forecast.variances.iter().map(|s2| self.metrics(*s2)).collect()
    }
}

/// One-shot VaR.
///
/// # Errors
/// - See [`RiskMetricCalculator::new`] and
///   [`RiskMetricCalculator::value_at_risk`].
pub fn value_at_risk(
    sigma2: f64, distribution: Distribution, confidence: ConfidenceLevel,
) -> RiskResult<f64> {
    RiskMetricCalculator::new(distribution, confidence)?.value_at_risk(sigma2)
}

/// One-shot ES.
///
/// # Errors
/// - See [`RiskMetricCalculator::new`] and
///   [`RiskMetricCalculator::expected_shortfall`].
pub fn expected_shortfall(
    sigma2: f64, distribution: Distribution, confidence: ConfidenceLevel,
) -> RiskResult<f64> {
    RiskMetricCalculator::new(distribution, confidence)?.expected_shortfall(sigma2)
}

fn checked_sigma(sigma2: f64) -> RiskResult<f64> {
    if !sigma2.is_finite() || sigma2 < 0.0 {
        return Err(RiskError::invalid_input(format!(
            "variance must be finite and non-negative, got {sigma2}"
        )));
    }
    Ok(sigma2.sqrt())
}
