//! Exception counting against a historical VaR series.
//!
//! Purpose
//! -------
//! Check a fitted volatility model against realized returns: derive a VaR
//! threshold for every period from its fitted `σ_t` and count the periods
//! whose loss exceeded it.
//!
//! Key behaviors
//! -------------
//! - Returns and volatilities are inner-joined on dates before any
//!   arithmetic; the backtest length is the size of the intersection.
//! - `VaR_t = z·σ_t` is stored as a positive loss magnitude, with `z` the
//!   `c`-quantile of the fitted innovation law.
//! - An exception is `r_t < −VaR_t`. Under a correct model the exception
//!   rate tends to `1 − c`.
//!
//! Invariants & assumptions
//! ------------------------
//! - An empty intersection is `InsufficientData`.
//! - Negative volatilities are `InvalidInput`.
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::{
    backtest::kupiec::{KupiecTest, kupiec_pof},
    errors::{RiskError, RiskResult},
    risk::{ConfidenceLevel, RiskMetricCalculator},
    series::{HistoricalVarSeries, ReturnSeries, VolatilitySeries},
    volatility::Distribution,
};

/// Outcome of [`backtest_var`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub exceptions: usize,
    /// Number of aligned periods.
    pub n_obs: usize,
    pub exception_rate: f64,
    /// `(1 − c)·n_obs`.
    pub expected_exceptions: f64,
    pub confidence: ConfidenceLevel,
    /// Positive VaR thresholds on the aligned dates.
    pub historical_var: HistoricalVarSeries,
    pub exception_dates: Vec<NaiveDate>,
    pub kupiec: KupiecTest,
}

/// Backtest a conditional-volatility series against realized returns.
///
/// Parameters
/// ----------
/// - `returns`: realized returns.
/// - `volatility`: fitted conditional standard deviations `σ_t`.
/// - `distribution`: innovation law whose quantile sets the threshold.
/// - `confidence`: VaR level `c`.
///
/// Errors
/// ------
/// - `InsufficientData` if the two series share no dates.
/// - `InvalidInput` if a volatility is negative.
/// - `InvalidParameter` for a Student-t with `ν ≤ 2`.
pub fn backtest_var(
    returns: &ReturnSeries, volatility: &VolatilitySeries, distribution: Distribution,
    confidence: ConfidenceLevel,
) -> RiskResult<BacktestResult> {
    let calc = RiskMetricCalculator::new(distribution, confidence)?;
    let aligned = returns.inner_join(volatility);
    if aligned.is_empty() {
        return Err(RiskError::InsufficientData { model: "backtest", required: 1, actual: 0 });
    }
    if let Some(bad) = aligned.right.iter().find(|s| **s < 0.0) {
        return Err(RiskError::invalid_input(format!(
            "conditional volatility must be non-negative, got {bad}"
        )));
    }

    let thresholds = aligned.right.mapv(|sigma| calc.quantile() * sigma);
    let exception_dates: Vec<NaiveDate> = aligned
        .dates
        .iter()
        .zip(aligned.left.iter().zip(thresholds.iter()))
        .filter(|(_, (r, var))| **r < -**var)
        .map(|(date, _)| *date)
        .collect();

    let n_obs = aligned.len();
    let exceptions = exception_dates.len();
    let tail = confidence.tail();
    let kupiec = kupiec_pof(exceptions, n_obs, tail)?;
    let historical_var = HistoricalVarSeries::new(aligned.dates, thresholds)?;
    info!(
        exceptions,
        n_obs,
        expected = tail * n_obs as f64,
        kupiec_p = kupiec.p_value,
        "VaR backtest complete"
    );
    Ok(BacktestResult {
        exceptions,
        n_obs,
        exception_rate: exceptions as f64 / n_obs as f64,
        expected_exceptions: tail * n_obs as f64,
        confidence,
        historical_var,
        exception_dates,
        kupiec,
    })
}
