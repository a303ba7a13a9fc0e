//! Date-indexed numeric series and inner-join alignment.
//!
//! Purpose
//! -------
//! Provide the one container every stage of the pipeline passes around:
//! a strictly increasing vector of calendar dates paired with an
//! `ndarray::Array1<f64>` of finite values.
//!
//! Key behaviors
//! -------------
//! - [`TimeSeries::new`] validates equal lengths, strictly increasing dates
//!   and finite values.
//! - [`TimeSeries::inner_join`] intersects two series on their dates with a
//!   single merge pass, producing an [`AlignedPair`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `dates.len() == values.len()`.
//! - `dates[i] < dates[i + 1]` for every `i`.
//! - Every value is finite.
//! - Empty series are representable; estimators enforce their own minimum
//!   lengths.
//!
//! Conventions
//! -----------
//! - Returns, residuals, conditional volatilities and historical VaR share
//!   this type through the aliases below; the alias documents the content.
use chrono::NaiveDate;
use ndarray::{Array1, s};
use serde::{Serialize, Serializer, ser::SerializeSeq};

use crate::errors::{RiskError, RiskResult};

/// Simple returns `(p_t / p_{t−1}) − 1`, dated at `t`.
pub type ReturnSeries = TimeSeries;

/// One-step-ahead prediction errors of a mean model.
pub type ResidualSeries = TimeSeries;

/// Fitted conditional standard deviations `σ_t`.
pub type VolatilitySeries = TimeSeries;

/// Per-period VaR thresholds, stored as positive loss magnitudes.
pub type HistoricalVarSeries = TimeSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    values: Array1<f64>,
}

impl TimeSeries {
    /// Build a validated series.
    ///
    /// Errors
    /// ------
    /// - `InvalidInput` when lengths differ, dates are not strictly
    ///   increasing (duplicates included), or a value is NaN/±∞.
    pub fn new(dates: Vec<NaiveDate>, values: Array1<f64>) -> RiskResult<Self> {
        if dates.len() != values.len() {
            return Err(RiskError::invalid_input(format!(
                "{} dates but {} values",
                dates.len(),
                values.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(RiskError::invalid_input(format!(
                "dates must be strictly increasing: {} is followed by {}",
                w[0], w[1]
            )));
        }
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RiskError::invalid_input(format!(
                "non-finite value {v} on {}",
                dates[i]
            )));
        }
        Ok(Self { dates, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// `(date, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Drop the first `n` observations (all of them if `n ≥ len`).
    pub fn skip(&self, n: usize) -> TimeSeries {
        let n = n.min(self.len());
        TimeSeries { dates: self.dates[n..].to_vec(), values: self.values.slice(s![n..]).to_owned() }
    }

    /// Same dates, values replaced by `f(value)`.
    ///
    /// Errors
    /// ------
    /// - `InvalidInput` if `f` produces a non-finite value.
    pub fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> RiskResult<TimeSeries> {
        TimeSeries::new(self.dates.clone(), self.values.mapv(f))
    }

    /// Intersect `self` and `other` on dates.
    ///
    /// Both date vectors are sorted, so a two-pointer merge gives the
    /// intersection in `O(n + m)`. The result length equals the size of the
    /// date intersection.
    pub fn inner_join(&self, other: &TimeSeries) -> AlignedPair {
        let (mut i, mut j) = (0usize, 0usize);
        let mut dates = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();
        while i < self.dates.len() && j < other.dates.len() {
            match self.dates[i].cmp(&other.dates[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dates.push(self.dates[i]);
                    left.push(self.values[i]);
                    right.push(other.values[j]);
                    i += 1;
                    j += 1;
                }
            }
        }
        AlignedPair { dates, left: Array1::from(left), right: Array1::from(right) }
    }
}

/// Serialized as a sequence of `{ "date": …, "value": … }` records.
impl Serialize for TimeSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Point {
            date: NaiveDate,
            value: f64,
        }
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for (date, value) in self.iter() {
            seq.serialize_element(&Point { date, value })?;
        }
        seq.end()
    }
}

/// Two series restricted to their common dates.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub dates: Vec<NaiveDate>,
    pub left: Array1<f64>,
    pub right: Array1<f64>,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
