//! Innovation distributions.
//!
//! Purpose
//! -------
//! One closed enum covers everything the pipeline asks of an innovation
//! law: the log-density for estimation, `E|z|` for EGARCH, and the
//! quantile and density that drive VaR and ES. All of them refer to the
//! same unit-variance law, so `σ_t` from a fit is a standard deviation
//! everywhere it is used.
//!
//! Key behaviors
//! -------------
//! - [`Distribution::standardized_ln_pdf`]: log-density of `ε` given
//!   `Var(ε) = σ²`, using the unit-variance Student-t for the t family.
//! - [`Distribution::quantile`] / [`Distribution::density`]: the
//!   unit-variance law; for Student-t that is `t(ν)` scaled by
//!   `sqrt((ν − 2)/ν)`.
//! - [`Distribution::expected_abs`]: `E|z|` of the unit-variance law.
//!
//! Invariants & assumptions
//! ------------------------
//! - `StudentT { nu }` has finite `nu > 2`; estimation guarantees it
//!   through its `ν` transform and [`Distribution::student_t`] checks it.
use serde::{Deserialize, Serialize};
use statrs::{
    distribution::{Continuous, ContinuousCDF, Normal, StudentsT},
    function::gamma::ln_gamma,
};
use std::{
    f64::consts::{FRAC_2_PI, PI},
    str::FromStr,
};

use crate::errors::{RiskError, RiskResult};

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Distribution selector used in configuration, before `ν` is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionKind {
    #[serde(alias = "normal", alias = "gaussian")]
    Normal,
    #[serde(alias = "t", alias = "studentt", alias = "student_t")]
    StudentT,
}

impl DistributionKind {
    /// Extra parameters estimated jointly with the variance model.
    pub fn parameter_count(&self) -> usize {
        match self {
            DistributionKind::Normal => 0,
            DistributionKind::StudentT => 1,
        }
    }
}

impl FromStr for DistributionKind {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "normal" | "gaussian" => Ok(DistributionKind::Normal),
            "t" | "studentt" | "student" => Ok(DistributionKind::StudentT),
            _ => Err(RiskError::invalid_parameter(
                "distribution",
                s,
                "Valid options are 'normal' or 't' (case insensitive).",
            )),
        }
    }
}

/// Fully specified innovation law.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Distribution {
    Normal,
    StudentT { nu: f64 },
}

impl Distribution {
    pub const fn normal() -> Self {
        Distribution::Normal
    }

    /// Student-t with `nu` degrees of freedom.
    ///
    /// # Errors
    /// - `InvalidParameter` unless `nu` is finite and `> 2`.
    pub fn student_t(nu: f64) -> RiskResult<Self> {
        if !nu.is_finite() || nu <= 2.0 {
            return Err(RiskError::invalid_parameter(
                "nu",
                nu,
                "Student-t degrees of freedom must be finite and greater than 2.",
            ));
        }
        Ok(Distribution::StudentT { nu })
    }

    pub fn kind(&self) -> DistributionKind {
        match self {
            Distribution::Normal => DistributionKind::Normal,
            Distribution::StudentT { .. } => DistributionKind::StudentT,
        }
    }

    pub fn nu(&self) -> Option<f64> {
        match self {
            Distribution::Normal => None,
            Distribution::StudentT { nu } => Some(*nu),
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.kind().parameter_count()
    }

    /// `c`-quantile of the unit-variance law.
    ///
    /// # Errors
    /// - `InvalidParameter` unless `0 < c < 1`.
    pub fn quantile(&self, c: f64) -> RiskResult<f64> {
        if c.is_nan() || c <= 0.0 || c >= 1.0 {
            return Err(RiskError::invalid_parameter(
                "confidence",
                c,
                "Confidence level must lie strictly between 0 and 1.",
            ));
        }
        match self {
            Distribution::Normal => Ok(standard_normal()?.inverse_cdf(c)),
            Distribution::StudentT { nu } => Ok(unit_variance_t(*nu)?.inverse_cdf(c)),
        }
    }

    /// Density of the unit-variance law at `x`.
    pub fn density(&self, x: f64) -> RiskResult<f64> {
        match self {
            Distribution::Normal => Ok(standard_normal()?.pdf(x)),
            Distribution::StudentT { nu } => Ok(unit_variance_t(*nu)?.pdf(x)),
        }
    }

    /// `ln f(ε)` for a zero-mean innovation with variance `sigma2`.
    ///
    /// Student-t uses the unit-variance parameterization
    /// `lnΓ((ν+1)/2) − lnΓ(ν/2) − ½ln(π(ν−2)) − ½ln σ² − (ν+1)/2 · ln(1 + ε²/(σ²(ν−2)))`.
    pub fn standardized_ln_pdf(&self, eps: f64, sigma2: f64) -> f64 {
        match self {
            Distribution::Normal => -0.5 * (LN_2PI + sigma2.ln() + eps * eps / sigma2),
            Distribution::StudentT { nu } => {
                let nu = *nu;
                ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu)
                    - 0.5 * (PI * (nu - 2.0)).ln()
                    - 0.5 * sigma2.ln()
                    - 0.5 * (nu + 1.0) * (eps * eps / (sigma2 * (nu - 2.0))).ln_1p()
            }
        }
    }

    /// `E|z|` for the unit-variance law.
    pub fn expected_abs(&self) -> f64 {
        match self {
            Distribution::Normal => FRAC_2_PI.sqrt(),
            Distribution::StudentT { nu } => {
                let nu = *nu;
                let ln_ratio = ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu);
                2.0 * (nu - 2.0).sqrt() * ln_ratio.exp() / ((nu - 1.0) * PI.sqrt())
            }
        }
    }
}

impl std::fmt::Display for Distribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distribution::Normal => f.write_str("Normal"),
            Distribution::StudentT { nu } => write!(f, "StudentT(nu = {nu:.4})"),
        }
    }
}

// ---- Helper Methods ----

fn standard_normal() -> RiskResult<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| RiskError::invalid_input(e.to_string()))
}

/// `t(ν)` rescaled to unit variance.
fn unit_variance_t(nu: f64) -> RiskResult<StudentsT> {
    let invalid =
        || RiskError::invalid_parameter("nu", nu, "Unit-variance Student-t needs finite nu > 2.");
    if !nu.is_finite() || nu <= 2.0 {
        return Err(invalid());
    }
    StudentsT::new(0.0, ((nu - 2.0) / nu).sqrt(), nu).map_err(|_| invalid())
}
