//! Stable parameter transforms between optimizer space and model space.
//!
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞) without overflow.
//! - [`safe_softmax`] / [`inverse_softmax`]: ℝ^k ↔ the scaled simplex
//!   `{(w, slack) : w ≥ 0, Σw + slack = 1 − STATIONARITY_MARGIN}` with the
//!   slack as softmax baseline. Used for GARCH `(α, β)`.
//! - [`pacf_to_coefficients`] / [`coefficients_to_pacf`]: ℝ^k ↔ stationary
//!   autoregressive polynomials via partial autocorrelations and the
//!   Durbin–Levinson recursion. Used for ARIMA AR/MA terms and EGARCH β.
use ndarray::{Array1, ArrayView1, ArrayViewMut1, Zip};

use crate::optimization::errors::{OptError, OptResult};

/// Mass removed from the GARCH simplex so that `Σα + Σβ < 1` strictly.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Floor applied to simplex weights before taking logs.
pub const LOGIT_EPS: f64 = 1e-12;

/// Eigenvalues at or below this are treated as zero in pseudo-inverses.
pub const EIGEN_EPS: f64 = 1e-10;

/// Largest partial autocorrelation magnitude produced by the inverse map.
pub const PACF_CLAMP: f64 = 0.999;

const SOFTPLUS_CUTOFF: f64 = 20.0;

/// `ln(1 + eˣ)`, returning `x` once `eˣ` dominates.
pub fn safe_softplus(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Inverse of [`safe_softplus`] for `x > 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > SOFTPLUS_CUTOFF { x } else { x.exp_m1().ln() }
}

/// Map logits onto the scaled simplex with an implicit zero-logit slack.
///
/// Writes the first `alpha.len()` weights into `alpha` and the rest into
/// `beta`. The weights plus the implied slack sum to
/// `1 − STATIONARITY_MARGIN`. A max-shift keeps every exponent ≤ 0.
///
/// # Errors
/// - `ThetaLengthMismatch` if `alpha.len() + beta.len() != logits.len()`.
pub fn safe_softmax(
    mut alpha: ArrayViewMut1<f64>, mut beta: ArrayViewMut1<f64>, logits: &ArrayView1<f64>,
) -> OptResult<()> {
    let k = alpha.len();
    if k + beta.len() != logits.len() {
        return Err(OptError::ThetaLengthMismatch {
            expected: k + beta.len(),
            actual: logits.len(),
        });
    }
    let shift = logits.iter().fold(0.0_f64, |m, &l| m.max(l));
    let denom = (-shift).exp() + logits.iter().map(|&l| (l - shift).exp()).sum::<f64>();
    let scale = (1.0 - STATIONARITY_MARGIN) / denom;
    Zip::from(&mut alpha)
        .and(logits.slice(ndarray::s![..k]))
        .for_each(|a, &l| *a = scale * (l - shift).exp());
    Zip::from(&mut beta)
        .and(logits.slice(ndarray::s![k..]))
        .for_each(|b, &l| *b = scale * (l - shift).exp());
    Ok(())
}

/// Inverse of [`safe_softmax`]: log-odds of each weight against the slack.
///
/// `weights` are the simplex components (α then β) and `slack` is the
/// remaining mass; both are floored at [`LOGIT_EPS`] before the logs.
pub fn inverse_softmax(weights: ArrayView1<f64>, slack: f64) -> Array1<f64> {
    let denom_inv = 1.0 / (1.0 - STATIONARITY_MARGIN);
    let log_slack = (slack * denom_inv).max(LOGIT_EPS).ln();
    weights.mapv(|w| (w * denom_inv).max(LOGIT_EPS).ln() - log_slack)
}

/// Map unconstrained reals to the coefficients of a stationary AR polynomial.
///
/// Each input is squashed into a partial autocorrelation `r_k = tanh(u_k)`
/// and the Durbin–Levinson recursion
/// `φ_{k,i} = φ_{k−1,i} − r_k φ_{k−1,k−i}`, `φ_{k,k} = r_k`
/// builds coefficients for `y_t = Σ φ_i y_{t−i} + e_t` whose characteristic
/// roots lie outside the unit circle.
pub fn pacf_to_coefficients(unconstrained: ArrayView1<f64>) -> Array1<f64> {
    let n = unconstrained.len();
    let mut phi = Array1::<f64>::zeros(n);
    let mut prev = Array1::<f64>::zeros(n);
    for k in 0..n {
        let r = unconstrained[k].tanh();
        prev.assign(&phi);
        for i in 0..k {
            phi[i] = prev[i] - r * prev[k - 1 - i];
        }
        phi[k] = r;
    }
    phi
}

/// Inverse of [`pacf_to_coefficients`].
///
/// Runs the Durbin–Levinson recursion backwards to recover the partial
/// autocorrelations, clamps them to `±PACF_CLAMP`, and returns `atanh(r_k)`.
/// Coefficients of a non-stationary polynomial are therefore mapped to a
/// nearby stationary point rather than rejected.
pub fn coefficients_to_pacf(coefficients: ArrayView1<f64>) -> Array1<f64> {
    let n = coefficients.len();
    let mut phi = coefficients.to_owned();
    let mut out = Array1::<f64>::zeros(n);
    for k in (0..n).rev() {
        let r = phi[k].clamp(-PACF_CLAMP, PACF_CLAMP);
        out[k] = r.atanh();
        let denom = 1.0 - r * r;
        let prev = phi.clone();
        for i in 0..k {
            phi[i] = (prev[i] + r * prev[k - 1 - i]) / denom;
        }
    }
    out
}
