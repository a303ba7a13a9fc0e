//! Volatility parameters in model space and their optimizer-space encoding.
//!
//! Purpose
//! -------
//! Decode the unconstrained vector `θ` moved by the optimizer into GARCH or
//! EGARCH coefficients (plus the Student-t `ν` when present), and encode
//! starting values back into `θ`.
//!
//! Key behaviors
//! -------------
//! - GARCH: `θ = [softplus⁻¹(ω), logits(α, β), θ_ν?]`. The logits go through
//!   [`safe_softmax`], so every iterate satisfies
//!   `Σα + Σβ + slack = 1 − STATIONARITY_MARGIN` with `slack > 0`.
//! - EGARCH: `θ = [ω, α, γ, u_β, θ_ν?]` with `β = pacf_to_coefficients(u_β)`,
//!   which keeps the log-variance recursion stationary.
//! - `ν = 2 + MIN_NU_EXCESS + softplus(θ_ν)` so the unit-variance Student-t
//!   is always defined.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ` length is `1 + p + o + q + k` where `k` is the distribution's
//!   parameter count and `o = 0` for GARCH.
//! - The natural vector `[ω, α, γ?, β, ν?]` is what fits report and what
//!   standard errors are computed on.
use ndarray::{Array1, ArrayView1, s};
use serde::Serialize;

use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::validation::validate_theta,
        numerical_stability::{
            STATIONARITY_MARGIN, coefficients_to_pacf, inverse_softmax, pacf_to_coefficients,
            safe_softmax, safe_softplus, safe_softplus_inv,
        },
    },
    volatility::core::{
        distribution::{Distribution, DistributionKind},
        orders::{VolatilityFamily, VolatilityOrders},
    },
};

/// Smallest admissible `ν − 2` in estimation.
pub const MIN_NU_EXCESS: f64 = 0.05;

/// `ν` used for starting values.
pub const START_NU: f64 = 8.0;

/// GARCH(p, q): `σ²_t = ω + Σ α_i ε²_{t−i} + Σ β_j σ²_{t−j}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarchParams {
    pub omega: f64,
    pub alpha: Array1<f64>,
    pub beta: Array1<f64>,
    /// `1 − STATIONARITY_MARGIN − Σα − Σβ`; distance to the boundary.
    pub slack: f64,
}

/// EGARCH(p, o, q):
/// `ln σ²_t = ω + Σ α_i (|z_{t−i}| − E|z|) + Σ γ_k z_{t−k} + Σ β_j ln σ²_{t−j}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EgarchParams {
    pub omega: f64,
    pub alpha: Array1<f64>,
    pub gamma: Array1<f64>,
    pub beta: Array1<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum VolatilityParams {
    Garch(GarchParams),
    Egarch(EgarchParams),
}

impl VolatilityParams {
    /// Length of `θ` (and of the natural vector).
    pub fn n_params(
        family: VolatilityFamily, orders: &VolatilityOrders, kind: DistributionKind,
    ) -> usize {
        let o = match family {
            VolatilityFamily::Garch => 0,
            VolatilityFamily::Egarch => orders.o,
        };
        1 + orders.p + o + orders.q + kind.parameter_count()
    }

    /// Labels of the natural vector: `omega`, `alpha[i]`, `gamma[k]`,
    /// `beta[j]`, `nu`.
    pub fn names(
        family: VolatilityFamily, orders: &VolatilityOrders, kind: DistributionKind,
    ) -> Vec<String> {
        let mut names = vec!["omega".to_string()];
        names.extend((1..=orders.p).map(|i| format!("alpha[{i}]")));
        if family == VolatilityFamily::Egarch {
            names.extend((1..=orders.o).map(|k| format!("gamma[{k}]")));
        }
        names.extend((1..=orders.q).map(|j| format!("beta[{j}]")));
        if kind == DistributionKind::StudentT {
            names.push("nu".to_string());
        }
        names
    }

    /// Decode an optimizer vector into parameters and distribution.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `InvalidThetaInput` from [`validate_theta`].
    pub fn from_theta(
        theta: ArrayView1<f64>, family: VolatilityFamily, orders: &VolatilityOrders,
        kind: DistributionKind,
    ) -> OptResult<(Self, Distribution)> {
        validate_theta(theta, Self::n_params(family, orders, kind))?;
        let (p, q) = (orders.p, orders.q);
        let params = match family {
            VolatilityFamily::Garch => {
                let omega = safe_softplus(theta[0]);
                let mut alpha = Array1::<f64>::zeros(p);
                let mut beta = Array1::<f64>::zeros(q);
                let logits = theta.slice(s![1..1 + p + q]);
                safe_softmax(alpha.view_mut(), beta.view_mut(), &logits)?;
                let slack = 1.0 - STATIONARITY_MARGIN - alpha.sum() - beta.sum();
                VolatilityParams::Garch(GarchParams { omega, alpha, beta, slack })
            }
            VolatilityFamily::Egarch => {
                let o = orders.o;
                VolatilityParams::Egarch(EgarchParams {
                    omega: theta[0],
                    alpha: theta.slice(s![1..1 + p]).to_owned(),
                    gamma: theta.slice(s![1 + p..1 + p + o]).to_owned(),
                    beta: pacf_to_coefficients(theta.slice(s![1 + p + o..1 + p + o + q])),
                })
            }
        };
        let dist = match kind {
            DistributionKind::Normal => Distribution::Normal,
            DistributionKind::StudentT => {
                Distribution::StudentT { nu: nu_from_raw(theta[theta.len() - 1]) }
            }
        };
        Ok((params, dist))
    }

    /// Encode into optimizer space. Inverse of [`VolatilityParams::from_theta`]
    /// for admissible parameters.
    pub fn to_theta(&self, dist: &Distribution) -> Array1<f64> {
        let mut theta = Vec::new();
        match self {
            VolatilityParams::Garch(g) => {
                theta.push(safe_softplus_inv(g.omega.max(f64::MIN_POSITIVE)));
                let weights: Array1<f64> = g.alpha.iter().chain(g.beta.iter()).copied().collect();
                let slack = 1.0 - STATIONARITY_MARGIN - weights.sum();
                theta.extend(inverse_softmax(weights.view(), slack));
            }
            VolatilityParams::Egarch(e) => {
                theta.push(e.omega);
                theta.extend(e.alpha.iter().copied());
                theta.extend(e.gamma.iter().copied());
                theta.extend(coefficients_to_pacf(e.beta.view()));
            }
        }
        if let Some(nu) = dist.nu() {
            theta.push(raw_from_nu(nu));
        }
        Array1::from(theta)
    }

    /// Natural vector `[ω, α, γ?, β, ν?]`.
    pub fn to_natural(&self, dist: &Distribution) -> Array1<f64> {
        let mut out: Vec<f64> = match self {
            VolatilityParams::Garch(g) => std::iter::once(g.omega)
                .chain(g.alpha.iter().copied())
                .chain(g.beta.iter().copied())
                .collect(),
            VolatilityParams::Egarch(e) => std::iter::once(e.omega)
                .chain(e.alpha.iter().copied())
                .chain(e.gamma.iter().copied())
                .chain(e.beta.iter().copied())
                .collect(),
        };
        if let Some(nu) = dist.nu() {
            out.push(nu);
        }
        Array1::from(out)
    }

    /// Build from the natural vector without the optimizer-space maps.
    ///
    /// Used for standard errors, where the likelihood is differentiated in
    /// natural coordinates.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` on a wrong length.
    /// - `InvalidThetaInput` for a GARCH `ω ≤ 0`, a negative GARCH
    ///   coefficient, or `ν ≤ 2`.
    pub fn from_natural(
        natural: ArrayView1<f64>, family: VolatilityFamily, orders: &VolatilityOrders,
        kind: DistributionKind,
    ) -> OptResult<(Self, Distribution)> {
        validate_theta(natural, Self::n_params(family, orders, kind))?;
        let (p, q) = (orders.p, orders.q);
        let params = match family {
            VolatilityFamily::Garch => {
                if natural[0] <= 0.0 {
                    return Err(OptError::InvalidThetaInput { index: 0, value: natural[0] });
                }
                if let Some((i, v)) =
                    natural.slice(s![1..1 + p + q]).iter().enumerate().find(|(_, v)| **v < 0.0)
                {
                    return Err(OptError::InvalidThetaInput { index: i + 1, value: *v });
                }
                let alpha = natural.slice(s![1..1 + p]).to_owned();
                let beta = natural.slice(s![1 + p..1 + p + q]).to_owned();
                let slack = 1.0 - STATIONARITY_MARGIN - alpha.sum() - beta.sum();
                VolatilityParams::Garch(GarchParams { omega: natural[0], alpha, beta, slack })
            }
            VolatilityFamily::Egarch => {
                let o = orders.o;
                VolatilityParams::Egarch(EgarchParams {
                    omega: natural[0],
                    alpha: natural.slice(s![1..1 + p]).to_owned(),
                    gamma: natural.slice(s![1 + p..1 + p + o]).to_owned(),
                    beta: natural.slice(s![1 + p + o..1 + p + o + q]).to_owned(),
                })
            }
        };
        let dist = match kind {
            DistributionKind::Normal => Distribution::Normal,
            DistributionKind::StudentT => {
                let idx = natural.len() - 1;
                let nu = natural[idx];
                if nu <= 2.0 {
                    return Err(OptError::InvalidThetaInput { index: idx, value: nu });
                }
                Distribution::StudentT { nu }
            }
        };
        Ok((params, dist))
    }

    /// Starting values for estimation.
    ///
    /// - GARCH: `α_i = 0.05/p`, `β_j = 0.90/q`, `ω = s²(1 − Σα − Σβ)`.
    /// - EGARCH: `α_i = 0.1/p`, `γ = 0`, `β_j = 0.9/q`,
    ///   `ω = ln s² · (1 − Σβ)`.
    pub fn initial(family: VolatilityFamily, orders: &VolatilityOrders, sample_var: f64) -> Self {
        let (p, q) = (orders.p, orders.q);
        let split = |total: f64, n: usize| {
            if n == 0 { Array1::zeros(0) } else { Array1::from_elem(n, total / n as f64) }
        };
        match family {
            VolatilityFamily::Garch => {
                let alpha = split(0.05, p);
                let beta = split(0.90, q);
                let persistence = alpha.sum() + beta.sum();
                let slack = 1.0 - STATIONARITY_MARGIN - persistence;
                VolatilityParams::Garch(GarchParams {
                    omega: sample_var * (1.0 - persistence),
                    alpha,
                    beta,
                    slack,
                })
            }
            VolatilityFamily::Egarch => {
                let beta = split(0.9, q);
                VolatilityParams::Egarch(EgarchParams {
                    omega: sample_var.ln() * (1.0 - beta.sum()),
                    alpha: split(0.1, p),
                    gamma: Array1::zeros(orders.o),
                    beta,
                })
            }
        }
    }

    /// Parameters for residuals multiplied by `sqrt(s2)`, given parameters
    /// fitted on the unscaled residuals.
    ///
    /// GARCH: `ω ↦ s2·ω`. EGARCH: `ω ↦ ω + (1 − Σβ) ln s2`. Shock
    /// coefficients and `ν` are scale free.
    pub fn rescale(&self, s2: f64) -> Self {
        match self {
            VolatilityParams::Garch(g) => {
                VolatilityParams::Garch(GarchParams { omega: g.omega * s2, ..g.clone() })
            }
            VolatilityParams::Egarch(e) => VolatilityParams::Egarch(EgarchParams {
                omega: e.omega + (1.0 - e.beta.sum()) * s2.ln(),
                ..e.clone()
            }),
        }
    }

    /// Long-run variance `ω / (1 − Σα − Σβ)` for GARCH; `None` for EGARCH.
    pub fn unconditional_variance(&self) -> Option<f64> {
        match self {
            VolatilityParams::Garch(g) => {
                let denom = 1.0 - g.alpha.sum() - g.beta.sum();
                (denom > 0.0).then(|| g.omega / denom)
            }
            VolatilityParams::Egarch(_) => None,
        }
    }

    /// GARCH: `Σα + Σβ`. EGARCH: `Σβ` (persistence of the log-variance).
    pub fn persistence(&self) -> f64 {
        match self {
            VolatilityParams::Garch(g) => g.alpha.sum() + g.beta.sum(),
            VolatilityParams::Egarch(e) => e.beta.sum(),
        }
    }

    pub fn family(&self) -> VolatilityFamily {
        match self {
            VolatilityParams::Garch(_) => VolatilityFamily::Garch,
            VolatilityParams::Egarch(_) => VolatilityFamily::Egarch,
        }
    }
}

/// `ν = 2 + MIN_NU_EXCESS + softplus(raw)`.
pub fn nu_from_raw(raw: f64) -> f64 {
    2.0 + MIN_NU_EXCESS + safe_softplus(raw)
}

/// Inverse of [`nu_from_raw`]; `ν` at or below the floor maps to a large
/// negative raw value.
pub fn raw_from_nu(nu: f64) -> f64 {
    safe_softplus_inv((nu - 2.0 - MIN_NU_EXCESS).max(1e-8))
}
