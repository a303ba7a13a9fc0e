//! Price-to-return transform.
use ndarray::Array1;

use crate::{
    errors::{RiskError, RiskResult},
    series::{price::PriceSeries, timeseries::ReturnSeries},
};

/// Simple percentage-change returns `r_t = p_t / p_{t−1} − 1`.
///
/// The first date has no predecessor and is dropped, so the result is one
/// observation shorter than `prices` and starts on `prices.dates()[1]`.
///
/// # Errors
/// - `InvalidInput` if `prices` has fewer than 2 observations.
pub fn pct_change(prices: &PriceSeries) -> RiskResult<ReturnSeries> {
    let n = prices.len();
    if n < 2 {
        return Err(RiskError::invalid_input(format!(
            "returns need at least 2 prices, got {n}"
        )));
    }
    let p = prices.values();
    let returns: Array1<f64> = (1..n).map(|t| p[t] / p[t - 1] - 1.0).collect();
    ReturnSeries::new(prices.dates()[1..].to_vec(), returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use ndarray::array;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 7, d).expect("valid test date")
    }

    #[test]
    // Purpose
    // -------
    // Returns are dated at the later price and are one shorter.
    //
    // Given
    // -----
    // - Prices [100, 110, 99].
    //
    // Expect
    // ------
    // - Returns [0.10, −0.10] dated days 2 and 3.
    fn pct_change_matches_hand_computation() {
        // Arrange
        let prices =
            PriceSeries::new(vec![day(1), day(2), day(3)], array![100.0, 110.0, 99.0]).expect("valid");

        // Act
        let r = pct_change(&prices).expect("returns should compute");

        // Assert
        assert_eq!(r.dates(), &[day(2), day(3)]);
        assert_abs_diff_eq!(r.values()[0], 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(r.values()[1], -0.10, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A single price cannot produce a return.
    //
    // Given
    // -----
    // - One observation.
    //
    // Expect
    // ------
    // - `InvalidInput`.
    fn pct_change_rejects_single_price() {
        let prices = PriceSeries::new(vec![day(1)], array![50.0]).expect("valid");
        assert!(matches!(pct_change(&prices), Err(RiskError::InvalidInput { .. })));
    }
}
