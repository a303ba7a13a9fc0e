//! In-sample conditional-variance recursions and the likelihood built on
//! them.
//!
//! Purpose
//! -------
//! Turn residuals and a parameter set into the path `σ²_1..σ²_n`, and sum
//! the innovation log-density over that path.
//!
//! Key behaviors
//! -------------
//! - GARCH: `σ²_t = ω + Σ α_i ε²_{t−i} + Σ β_j σ²_{t−j}`.
//! - EGARCH: `ln σ²_t = ω + Σ α_i (|z_{t−i}| − E|z|) + Σ γ_k z_{t−k}
//!   + Σ β_j ln σ²_{t−j}` with `z_t = ε_t / σ_t`.
//! - Every `σ²_t` (or `ln σ²_t`) is clamped by [`VarianceGuards`].
//!
//! Conventions
//! -----------
//! - Pre-sample values come from the backcast `b = mean(ε²)`: GARCH uses
//!   `ε²_{t} = σ²_{t} = b` for `t < 0`; EGARCH uses `ln σ²_t = ln b` and
//!   zero shock terms for `t < 0`.
//! - The likelihood averages over all `n` observations.
use ndarray::{Array1, ArrayView1};

use crate::{
    optimization::errors::{OptError, OptResult},
    volatility::core::{
        distribution::Distribution,
        guards::VarianceGuards,
        params::{EgarchParams, GarchParams, VolatilityParams},
    },
};

/// Mean squared residual used to seed pre-sample lags.
pub fn backcast(eps: ArrayView1<f64>) -> f64 {
    if eps.is_empty() {
        return 0.0;
    }
    eps.iter().map(|e| e * e).sum::<f64>() / eps.len() as f64
}

/// Conditional variances for every observation of `eps`.
pub fn conditional_variances(
    params: &VolatilityParams, dist: &Distribution, eps: ArrayView1<f64>, backcast: f64,
    guards: &VarianceGuards,
) -> Array1<f64> {
    match params {
        VolatilityParams::Garch(g) => garch_variances(g, eps, backcast, guards),
        VolatilityParams::Egarch(e) => egarch_variances(e, dist, eps, backcast, guards),
    }
}

/// Average log-likelihood of `eps` under `params` and `dist`.
///
/// # Errors
/// - `NonFiniteCost` if the average is NaN or infinite.
pub fn average_loglik(
    params: &VolatilityParams, dist: &Distribution, eps: ArrayView1<f64>, backcast: f64,
    guards: &VarianceGuards,
) -> OptResult<f64> {
    let sigma2 = conditional_variances(params, dist, eps, backcast, guards);
    let total: f64 =
        eps.iter().zip(sigma2.iter()).map(|(e, s2)| dist.standardized_ln_pdf(*e, *s2)).sum();
    let value = total / eps.len() as f64;
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(value)
}

// ---- Helper Methods ----

fn garch_variances(
    g: &GarchParams, eps: ArrayView1<f64>, backcast: f64, guards: &VarianceGuards,
) -> Array1<f64> {
    let n = eps.len();
    let mut sigma2 = Array1::<f64>::zeros(n);
    for t in 0..n {
        let mut s2 = g.omega;
        for (i, a) in g.alpha.iter().enumerate() {
            let lag = i + 1;
            let e2 = if t >= lag { eps[t - lag] * eps[t - lag] } else { backcast };
            s2 += a * e2;
        }
        for (j, b) in g.beta.iter().enumerate() {
            let lag = j + 1;
            let prev = if t >= lag { sigma2[t - lag] } else { backcast };
            s2 += b * prev;
        }
        sigma2[t] = guards.clamp(s2);
    }
    sigma2
}

fn egarch_variances(
    e: &EgarchParams, dist: &Distribution, eps: ArrayView1<f64>, backcast: f64,
    guards: &VarianceGuards,
) -> Array1<f64> {
    let n = eps.len();
    let abs_mean = dist.expected_abs();
    let ln_backcast = guards.clamp_log(backcast.ln());
    let mut log_s2 = Array1::<f64>::zeros(n);
    let mut z = Array1::<f64>::zeros(n);
    for t in 0..n {
        let mut acc = e.omega;
        for (i, a) in e.alpha.iter().enumerate() {
            let lag = i + 1;
            if t >= lag {
                acc += a * (z[t - lag].abs() - abs_mean);
            }
        }
        for (k, g) in e.gamma.iter().enumerate() {
            let lag = k + 1;
            if t >= lag {
                acc += g * z[t - lag];
            }
        }
        for (j, b) in e.beta.iter().enumerate() {
            let lag = j + 1;
            let prev = if t >= lag { log_s2[t - lag] } else { ln_backcast };
            acc += b * prev;
        }
        log_s2[t] = guards.clamp_log(acc);
        z[t] = eps[t] / (0.5 * log_s2[t]).exp();
    }
    log_s2.mapv_into(f64::exp)
}
