//! risk — parametric VaR and Expected Shortfall.
//!
//! - [`ConfidenceLevel`]: validated `c ∈ (0, 1)`, default 0.95.
//! - [`RiskMetricCalculator`]: quantile cached per distribution and level;
//!   VaR, ES, and metric paths over a [`ForecastResult`](crate::volatility::ForecastResult).
//!
//! All outputs are positive loss magnitudes.

pub mod confidence;
pub mod metrics;

// ---- Re-exports ----

pub use self::confidence::ConfidenceLevel;
pub use self::metrics::{RiskMetricCalculator, RiskMetrics, expected_shortfall, value_at_risk};
