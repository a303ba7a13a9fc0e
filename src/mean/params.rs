//! ARIMA parameters in model space and their optimizer-space encoding.
//!
//! Purpose
//! -------
//! Map between the unconstrained vector `θ` the optimizer moves and the
//! coefficients the recursion uses, so that every iterate is stationary and
//! invertible.
//!
//! Conventions
//! -----------
//! - `θ = [c?, u_ar (p), u_ma (q), log σ²]`, with `c` present only when
//!   the order has a constant.
//! - AR: `φ = pacf_to_coefficients(u_ar)`.
//! - MA: `ψ = −pacf_to_coefficients(u_ma)`, so `1 + Σψ_j zʲ` has its roots
//!   outside the unit circle.
//! - Natural vector (reported coefficients): `[c?, φ, ψ, σ²]`.
use ndarray::{Array1, ArrayView1, s};

use crate::{
    mean::order::ArimaOrder,
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::validation::validate_theta,
        numerical_stability::{coefficients_to_pacf, pacf_to_coefficients},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct ArimaParams {
    /// Mean of the differenced series (zero when `d > 0`).
    pub constant: f64,
    pub ar: Array1<f64>,
    pub ma: Array1<f64>,
    /// Innovation variance.
    pub sigma2: f64,
}

impl ArimaParams {
    /// Decode an optimizer vector.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` / `InvalidThetaInput` from [`validate_theta`].
    pub fn from_theta(theta: ArrayView1<f64>, order: &ArimaOrder) -> OptResult<Self> {
        validate_theta(theta, order.n_params())?;
        let offset = usize::from(order.has_constant());
        let constant = if order.has_constant() { theta[0] } else { 0.0 };
        let ar = pacf_to_coefficients(theta.slice(s![offset..offset + order.p]));
        let ma = -pacf_to_coefficients(
            theta.slice(s![offset + order.p..offset + order.p + order.q]),
        );
        let sigma2 = theta[theta.len() - 1].exp();
        Ok(Self { constant, ar, ma, sigma2 })
    }

    /// Encode into optimizer space. Inverse of [`ArimaParams::from_theta`]
    /// for stationary, invertible coefficients.
    pub fn to_theta(&self, order: &ArimaOrder) -> Array1<f64> {
        let mut theta = Vec::with_capacity(order.n_params());
        if order.has_constant() {
            theta.push(self.constant);
        }
        theta.extend(coefficients_to_pacf(self.ar.view()));
        let neg_ma = -&self.ma;
        theta.extend(coefficients_to_pacf(neg_ma.view()));
        theta.push(self.sigma2.ln());
        Array1::from(theta)
    }

    /// Build from the natural vector `[c?, φ, ψ, σ²]` without any
    /// stationarity mapping.
    ///
    /// # Errors
    /// - `ThetaLengthMismatch` on a wrong length.
    /// - `InvalidThetaInput` when `σ² ≤ 0`.
    pub fn from_natural(natural: ArrayView1<f64>, order: &ArimaOrder) -> OptResult<Self> {
        validate_theta(natural, order.n_params())?;
        let offset = usize::from(order.has_constant());
        let sigma2 = natural[natural.len() - 1];
        if sigma2 <= 0.0 {
            return Err(OptError::InvalidThetaInput { index: natural.len() - 1, value: sigma2 });
        }
        Ok(Self {
            constant: if order.has_constant() { natural[0] } else { 0.0 },
            ar: natural.slice(s![offset..offset + order.p]).to_owned(),
            ma: natural.slice(s![offset + order.p..offset + order.p + order.q]).to_owned(),
            sigma2,
        })
    }

    /// `[c?, φ, ψ, σ²]`.
    pub fn to_natural(&self, order: &ArimaOrder) -> Array1<f64> {
        let mut out = Vec::with_capacity(order.n_params());
        if order.has_constant() {
            out.push(self.constant);
        }
        out.extend(self.ar.iter().copied());
        out.extend(self.ma.iter().copied());
        out.push(self.sigma2);
        Array1::from(out)
    }

    /// Labels for [`ArimaParams::to_natural`]: `const`, `ar.L{i}`,
    /// `ma.L{j}`, `sigma2`.
    pub fn names(order: &ArimaOrder) -> Vec<String> {
        let mut names = Vec::with_capacity(order.n_params());
        if order.has_constant() {
            names.push("const".to_string());
        }
        names.extend((1..=order.p).map(|i| format!("ar.L{i}")));
        names.extend((1..=order.q).map(|j| format!("ma.L{j}")));
        names.push("sigma2".to_string());
        names
    }
}
