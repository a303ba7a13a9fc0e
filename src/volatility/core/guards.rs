//! Variance guards for the in-sample volatility recursion.
//!
//! Purpose
//! -------
//! Keep `σ²_t` inside a finite, strictly positive band while the optimizer
//! explores parameter space, so that `ln σ²_t` and `ε²/σ²_t` stay defined in
//! the likelihood.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 < min < max < ∞` for every constructed guard.
//! - Guards apply to estimation only. Forecasts are never clamped; they
//!   report `NumericalInstability` instead.
//!
//! Conventions
//! -----------
//! - Bounds are in squared return units. The default band `[1e-12, 1e12]`
//!   is wide enough for daily and intraday commodity returns.
use serde::{Deserialize, Serialize};

use crate::errors::{RiskError, RiskResult};

/// Lower/upper bounds for `σ²_t` during estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceGuards {
    /// Lower bound (strictly > 0).
    pub min: f64,
    /// Upper bound (strictly > `min`).
    pub max: f64,
}

impl VarianceGuards {
    /// Validated guards from a `(min, max)` pair.
    ///
    /// Errors
    /// ------
    /// - `InvalidParameter` when `min >= max`, either bound is non-finite,
    ///   or `min <= 0`.
    pub fn new(value: (f64, f64)) -> RiskResult<Self> {
        let (min, max) = value;
        if !min.is_finite() || !max.is_finite() {
            return Err(RiskError::invalid_parameter(
                "variance_guards",
                format!("({min}, {max})"),
                "Variance guards must be finite.",
            ));
        }
        if min >= max {
            return Err(RiskError::invalid_parameter(
                "variance_guards",
                format!("({min}, {max})"),
                "Variance guards must have min < max.",
            ));
        }
        if min <= 0.0 {
            return Err(RiskError::invalid_parameter(
                "variance_guards",
                format!("({min}, {max})"),
                "Variance guards must be strictly positive.",
            ));
        }
        Ok(Self { min, max })
    }

    /// Clamp a variance into `[min, max]`; NaN maps to `max`.
    #[inline]
    pub fn clamp(&self, sigma2: f64) -> f64 {
        if sigma2.is_nan() { self.max } else { sigma2.clamp(self.min, self.max) }
    }

    /// Clamp a log-variance into `[ln min, ln max]`; NaN maps to `ln max`.
    #[inline]
    pub fn clamp_log(&self, log_sigma2: f64) -> f64 {
        let (lo, hi) = (self.min.ln(), self.max.ln());
        if log_sigma2.is_nan() { hi } else { log_sigma2.clamp(lo, hi) }
    }
}

impl Default for VarianceGuards {
    fn default() -> Self {
        Self { min: 1e-12, max: 1e12 }
    }
}
