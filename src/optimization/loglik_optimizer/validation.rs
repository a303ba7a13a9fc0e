//! Validation helpers shared by the optimizer.
//!
//! - [`verify_tol_grad`], [`verify_tol_cost`]: tolerances are finite and > 0.
//! - [`validate_theta`]: a candidate θ has the expected length and finite
//!   entries (used by estimators' `LogLikelihood::check`).
//! - [`validate_grad`], [`validate_hessian`]: derivative shape and finiteness.
//! - [`validate_theta_hat`], [`validate_value`]: solver output sanity.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};
use ndarray::ArrayView1;

/// `None` passes; `Some(tol)` must be finite and strictly positive.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// `None` passes; `Some(tol)` must be finite and strictly positive.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Check an unconstrained parameter vector before it is mapped to a model.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] if `theta.len() != expected`.
/// - [`OptError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> OptResult<()> {
    if theta.len() != expected {
        return Err(OptError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaInput { index, value });
    }
    Ok(())
}

/// Gradient has length `dim` and only finite entries.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Unwrap the solver's best parameter and require finite entries.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let t = theta_hat.ok_or(OptError::MissingThetaHat)?;
    for (index, &value) in t.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaHat {
                index,
                value,
                reason: "Parameter estimates must be finite.",
            });
        }
    }
    Ok(t)
}

/// A log-likelihood value must be finite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Hessian is `dim × dim` with only finite entries.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((i, j), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row: i, col: j, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Shape and finiteness checks on θ, gradients and Hessians.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `validate_theta` reports length mismatches before finiteness.
    //
    // Given
    // -----
    // - A length-2 θ checked against 3, and a length-3 θ holding +∞.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, then `InvalidThetaInput { index: 2 }`.
    fn validate_theta_checks_length_then_finiteness() {
        assert_eq!(
            validate_theta(array![0.0, 1.0].view(), 3),
            Err(OptError::ThetaLengthMismatch { expected: 3, actual: 2 })
        );
        assert!(matches!(
            validate_theta(array![0.0, 1.0, f64::INFINITY].view(), 3),
            Err(OptError::InvalidThetaInput { index: 2, .. })
        ));
        assert!(validate_theta(array![0.0, 1.0, 2.0].view(), 3).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Gradient and Hessian validators reject wrong shapes and NaNs.
    //
    // Given
    // -----
    // - A gradient of the wrong length and a 2×2 Hessian containing NaN.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidHessian` at the NaN position.
    fn derivative_validators_reject_bad_inputs() {
        assert!(matches!(
            validate_grad(&array![1.0], 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 1 })
        ));
        let h = array![[1.0, 0.0], [f64::NAN, 1.0]];
        assert!(matches!(
            validate_hessian(&h, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }
}
