//! Validated price series and raw-observation preprocessing.
//!
//! Purpose
//! -------
//! Hold the positive, gap-free price history that feeds the pipeline, and
//! turn the raw `(date, Option<price>)` rows a provider delivers into one.
//!
//! Key behaviors
//! -------------
//! - [`PriceSeries::new`] validates an already clean series.
//! - [`PriceSeries::from_observations`] sorts rows by date, rejects
//!   duplicate dates, forward-fills missing values, and drops leading rows
//!   that have nothing to carry forward.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every price is finite and strictly positive.
//! - Dates are strictly increasing (inherited from [`TimeSeries`]).
//! - A non-finite raw value is treated as missing, matching how providers
//!   encode unavailable quotes.
use chrono::NaiveDate;
use ndarray::Array1;

use crate::{
    errors::{RiskError, RiskResult},
    series::timeseries::TimeSeries,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries(TimeSeries);

impl PriceSeries {
    /// Build from clean dates and prices.
    ///
    /// Errors
    /// ------
    /// - Any [`TimeSeries::new`] error.
    /// - `InvalidInput` if a price is `≤ 0`.
    pub fn new(dates: Vec<NaiveDate>, prices: Array1<f64>) -> RiskResult<Self> {
        let series = TimeSeries::new(dates, prices)?;
        if let Some((date, p)) = series.iter().find(|(_, p)| *p <= 0.0) {
            return Err(RiskError::invalid_input(format!(
                "price on {date} must be positive, got {p}"
            )));
        }
        Ok(Self(series))
    }

    /// Preprocess raw provider rows into a price series.
    ///
    /// Parameters
    /// ----------
    /// - `observations`: `(date, value)` rows in any order; `None` or a
    ///   non-finite value marks a missing quote.
    ///
    /// Returns
    /// -------
    /// A series with one entry per input date from the first available
    /// quote onward, missing quotes replaced by the previous price.
    ///
    /// Errors
    /// ------
    /// - `InvalidInput` for duplicate dates, a non-positive quote, or when
    ///   no quote is available at all.
    pub fn from_observations(mut observations: Vec<(NaiveDate, Option<f64>)>) -> RiskResult<Self> {
        observations.sort_by_key(|(date, _)| *date);
        if let Some(w) = observations.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(RiskError::invalid_input(format!("duplicate observation date {}", w[0].0)));
        }

        let mut dates = Vec::with_capacity(observations.len());
        let mut prices = Vec::with_capacity(observations.len());
        let mut last: Option<f64> = None;
        for (date, raw) in observations {
            let value = raw.filter(|v| v.is_finite()).or(last);
            // Leading gap: nothing to carry forward yet.
            let Some(value) = value else { continue };
            dates.push(date);
            prices.push(value);
            last = Some(value);
        }
        if dates.is_empty() {
            return Err(RiskError::invalid_input("no price observations available"));
        }
        PriceSeries::new(dates, Array1::from(prices))
    }

    pub fn as_series(&self) -> &TimeSeries {
        &self.0
    }

    pub fn dates(&self) -> &[NaiveDate] {
        self.0.dates()
    }

    pub fn values(&self) -> &Array1<f64> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
