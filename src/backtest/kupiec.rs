//! Kupiec proportion-of-failures test.
//!
//! `LR = −2 [ ln L(p₀) − ln L(x/n) ]` with
//! `ln L(p) = (n − x) ln(1 − p) + x ln p` and `0·ln 0 = 0`.
//! Under the null of correct coverage `LR ~ χ²(1)`.
use serde::Serialize;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::errors::{RiskError, RiskResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KupiecTest {
    pub statistic: f64,
    pub p_value: f64,
}

impl KupiecTest {
    /// Reject correct coverage at significance `alpha`.
    pub fn rejects(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// POF test of `exceptions` out of `n_obs` against the rate `expected_rate`.
///
/// # Errors
/// - `InsufficientData` if `n_obs == 0`.
/// - `InvalidInput` if `exceptions > n_obs`.
/// - `InvalidParameter` unless `0 < expected_rate < 1`.
pub fn kupiec_pof(exceptions: usize, n_obs: usize, expected_rate: f64) -> RiskResult<KupiecTest> {
    if n_obs == 0 {
        return Err(RiskError::InsufficientData { model: "Kupiec POF", required: 1, actual: 0 });
    }
    if exceptions > n_obs {
        return Err(RiskError::invalid_input(format!(
            "exception count {exceptions} exceeds observation count {n_obs}"
        )));
    }
    if expected_rate.is_nan() || expected_rate <= 0.0 || expected_rate >= 1.0 {
        return Err(RiskError::invalid_parameter(
            "expected_rate",
            expected_rate,
            "Expected exception rate must lie strictly between 0 and 1.",
        ));
    }
    let n = n_obs as f64;
    let x = exceptions as f64;
    let observed = x / n;
    let statistic =
        (-2.0 * (bernoulli_loglik(x, n, expected_rate) - bernoulli_loglik(x, n, observed))).max(0.0);
    let chi2 = ChiSquared::new(1.0).map_err(|e| RiskError::invalid_input(e.to_string()))?;
    let p_value = 1.0 - chi2.cdf(statistic);
    Ok(KupiecTest { statistic, p_value })
}

fn bernoulli_loglik(x: f64, n: f64, p: f64) -> f64 {
    let xlogy = |a: f64, b: f64| if a == 0.0 { 0.0 } else { a * b.ln() };
    xlogy(n - x, 1.0 - p) + xlogy(x, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    // Purpose
    // -------
    // Exact coverage gives a zero statistic; a doubled rate is rejected.
    //
    // Given
    // -----
    // - 50 of 1000 at 5%; 100 of 1000 at 5%.
    //
    // Expect
    // ------
    // - LR = 0, p = 1; LR ≈ 38.1 with p < 1e-6.
    fn statistic_matches_reference_values() {
        let exact = kupiec_pof(50, 1000, 0.05).expect("valid");
        assert_abs_diff_eq!(exact.statistic, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(exact.p_value, 1.0, epsilon = 1e-9);

        let doubled = kupiec_pof(100, 1000, 0.05).expect("valid");
        let expected = -2.0
            * (900.0 * 0.95_f64.ln() + 100.0 * 0.05_f64.ln()
                - 900.0 * 0.9_f64.ln()
                - 100.0 * 0.1_f64.ln());
        assert_abs_diff_eq!(doubled.statistic, expected, epsilon = 1e-9);
        assert!(doubled.rejects(0.01));
    }

    #[test]
    // Purpose
    // -------
    // Zero exceptions use the `0·ln 0 = 0` convention.
    //
    // Given
    // -----
    // - 0 of 100 at 5%.
    //
    // Expect
    // ------
    // - LR = −2·100·ln 0.95, finite.
    fn zero_exceptions_are_finite() {
        let t = kupiec_pof(0, 100, 0.05).expect("valid");
        assert_abs_diff_eq!(t.statistic, -200.0 * 0.95_f64.ln(), epsilon = 1e-9);
        assert!(t.p_value.is_finite());
    }

    #[test]
    // Purpose
    // -------
    // Degenerate inputs are typed errors.
    //
    // Given
    // -----
    // - n = 0; x > n; rate = 0.
    //
    // Expect
    // ------
    // - InsufficientData, InvalidInput, InvalidParameter.
    fn degenerate_inputs_are_rejected() {
        assert!(matches!(kupiec_pof(0, 0, 0.05), Err(RiskError::InsufficientData { .. })));
        assert!(matches!(kupiec_pof(5, 4, 0.05), Err(RiskError::InvalidInput { .. })));
        assert!(matches!(kupiec_pof(1, 4, 0.0), Err(RiskError::InvalidParameter { .. })));
    }
}
