//! Validated confidence level.
use serde::{Deserialize, Serialize};

use crate::errors::{RiskError, RiskResult};

/// Confidence level `c ∈ (0, 1)`; the tail probability is `1 − c`.
///
/// Deserializes from a bare number and rejects values outside the open
/// unit interval.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// # Errors
    /// - `InvalidParameter` unless `0 < c < 1`.
    pub fn new(c: f64) -> RiskResult<Self> {
        if c.is_nan() || c <= 0.0 || c >= 1.0 {
            return Err(RiskError::invalid_parameter(
                "confidence",
                c,
                "Confidence level must lie strictly between 0 and 1.",
            ));
        }
        Ok(Self(c))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `1 − c`.
    pub fn tail(&self) -> f64 {
        1.0 - self.0
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self(0.95)
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(c: ConfidenceLevel) -> Self {
        c.0
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
