//! Starting values for ARIMA estimation.
//!
//! - Constant: sample mean (only when the order has one).
//! - AR: partial autocorrelations from the Levinson–Durbin recursion on the
//!   sample autocorrelations, clamped to `±START_PACF_CLAMP`, mapped by
//!   `atanh` into optimizer space.
//! - MA: zeros.
//! - Variance: `ln` of the sample variance.
use ndarray::{Array1, ArrayView1};

use crate::mean::order::ArimaOrder;

/// Largest partial autocorrelation used in a starting point.
pub const START_PACF_CLAMP: f64 = 0.95;

/// Sample autocorrelations `r_0 = 1, r_1, …, r_max_lag` of a series
/// centered at `mean`.
pub fn sample_acf(y: ArrayView1<f64>, mean: f64, max_lag: usize) -> Vec<f64> {
    let n = y.len();
    let dev: Vec<f64> = y.iter().map(|v| v - mean).collect();
    let c0: f64 = dev.iter().map(|v| v * v).sum::<f64>();
    if c0 <= 0.0 {
        let mut flat = vec![0.0; max_lag + 1];
        flat[0] = 1.0;
        return flat;
    }
    (0..=max_lag)
        .map(|k| if k >= n { 0.0 } else { (k..n).map(|t| dev[t] * dev[t - k]).sum::<f64>() / c0 })
        .collect()
}

/// Partial autocorrelations of orders `1..=p` by Levinson–Durbin on `acf`,
/// each clamped to `±START_PACF_CLAMP` before it feeds the next step.
pub fn levinson_durbin_pacf(acf: &[f64], p: usize) -> Vec<f64> {
    let mut phi: Vec<f64> = Vec::with_capacity(p);
    let mut pacf = Vec::with_capacity(p);
    let mut v = 1.0;
    for k in 1..=p {
        let r_k = acf.get(k).copied().unwrap_or(0.0);
        let num = r_k - (1..k).map(|i| phi[i - 1] * acf[k - i]).sum::<f64>();
        let r = if v > 0.0 { num / v } else { 0.0 };
        let r = r.clamp(-START_PACF_CLAMP, START_PACF_CLAMP);
        let prev = phi.clone();
        for i in 1..k {
            phi[i - 1] = prev[i - 1] - r * prev[k - i - 1];
        }
        phi.push(r);
        v *= 1.0 - r * r;
        pacf.push(r);
    }
    pacf
}

/// Optimizer-space starting vector for `order` on the differenced series `y`.
///
/// `y` must be non-empty with positive variance; the estimator checks both.
pub fn initial_theta(order: &ArimaOrder, y: ArrayView1<f64>) -> Array1<f64> {
    let n = y.len() as f64;
    let mean = y.sum() / n;
    let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let acf = sample_acf(y, mean, order.p);

    let mut theta = Vec::with_capacity(order.n_params());
    if order.has_constant() {
        theta.push(mean);
    }
    theta.extend(levinson_durbin_pacf(&acf, order.p).into_iter().map(f64::atanh));
    theta.extend(std::iter::repeat_n(0.0, order.q));
    theta.push(var.ln());
    Array1::from(theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // For an AR(1)-shaped autocorrelation function the PACF cuts off after
    // lag one.
    //
    // Given
    // -----
    // - r_k = 0.5^k for k = 0..3.
    //
    // Expect
    // ------
    // - PACF ≈ [0.5, 0, 0].
    fn levinson_durbin_recovers_ar1_pacf() {
        let acf = [1.0, 0.5, 0.25, 0.125];
        let pacf = levinson_durbin_pacf(&acf, 3);
        assert_abs_diff_eq!(pacf[0], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(pacf[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pacf[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Starting vector layout and clamping of extreme autocorrelations.
    //
    // Given
    // -----
    // - A linear trend (lag-one autocorrelation near one) and ARMA(1, 0, 1).
    //
    // Expect
    // ------
    // - Four entries: mean, atanh(≤ 0.95), 0, ln(var).
    fn initial_theta_has_expected_layout() {
        // Arrange
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let order = ArimaOrder::new(1, 0, 1);

        // Act
        let theta = initial_theta(&order, y.view());

        // Assert
        assert_eq!(theta.len(), 4);
        assert_abs_diff_eq!(theta[0], 4.5, epsilon = 1e-12);
        assert!(theta[1].tanh() <= START_PACF_CLAMP + 1e-12);
        assert_eq!(theta[2], 0.0);
        assert_abs_diff_eq!(theta[3], 5.25_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Moving-average starts are zero for every MA lag.
    //
    // Given
    // -----
    // - A short alternating series and a differenced ARIMA(0, 1, 3).
    //
    // Expect
    // ------
    // - Length matches `n_params`: three zeros then ln(var), no constant.
    fn initial_theta_zeroes_every_ma_lag() {
        // Arrange
        let y = array![1.0, -1.0, 2.0, -2.0, 1.0, -1.0];
        let order = ArimaOrder::new(0, 1, 3);

        // Act
        let theta = initial_theta(&order, y.view());

        // Assert
        assert_eq!(theta.len(), order.n_params());
        assert_eq!(theta.len(), 4);
        assert!(theta.iter().take(3).all(|&v| v == 0.0));
        assert!(theta[3].is_finite());
    }
}
