//! loglik_optimizer::finite_diff — finite-difference derivatives.
//!
//! Purpose
//! -------
//! Supply the derivatives the estimators do not implement analytically:
//! gradients for the L-BFGS solver and Hessians for standard errors.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient (via `finitediff`) with
//!   error capture and validation. The adapter uses it as the fallback when
//!   central differences hit an error or a non-finite entry.
//! - [`compute_hessian`]: central-difference Hessian of a scalar function
//!   with per-coordinate relative steps, validated and symmetric by
//!   construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Objective closures cannot return `Result` inside `finitediff`; errors
//!   are parked in a `RefCell` and the closure returns `NaN`.
//! - Hessian steps scale with `|θ_i|` (floored at [`HESSIAN_STEP_FLOOR`]) so
//!   small positive parameters such as a GARCH intercept are not pushed out
//!   of their domain.
//!
//! Testing notes
//! -------------
//! - Unit tests cover quadratic objectives with known derivatives, error
//!   propagation from the closure, and rejection of non-finite results.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Smallest magnitude used to scale a Hessian step.
pub const HESSIAN_STEP_FLOOR: f64 = 1e-3;

/// Forward-difference gradient of `func` at `theta`.
///
/// Clears `closure_err`, runs `forward_diff`, returns any error `func`
/// parked in `closure_err`, and validates the result.
///
/// # Errors
/// - The captured closure error, converted into `OptError`.
/// - `GradientDimMismatch` / `InvalidGradient` from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Central-difference Hessian of a scalar function.
///
/// Parameters
/// ----------
/// - `f`: scalar objective; errors abort the computation.
/// - `theta`: evaluation point.
///
/// Returns
/// -------
/// A symmetric `k × k` matrix with
/// `H_ii = (f(θ+h_i) − 2f(θ) + f(θ−h_i)) / h_i²` and
/// `H_ij = (f(++) − f(+−) − f(−+) + f(−−)) / (4 h_i h_j)`, where
/// `h_i = ε^{1/4} · max(|θ_i|, HESSIAN_STEP_FLOOR)`.
///
/// Errors
/// ------
/// - Any error returned by `f`.
/// - `InvalidHessian` if an entry is non-finite.
pub fn compute_hessian<F: Fn(&Theta) -> OptResult<f64>>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let k = theta.len();
    let base = EPS_QUARTER;
    let steps: Vec<f64> = theta.iter().map(|t| base * t.abs().max(HESSIAN_STEP_FLOOR)).collect();
    let f0 = f(theta)?;
    let mut hess = Hessian::zeros((k, k));
    let mut x = theta.clone();
    for i in 0..k {
        let hi = steps[i];
        x[i] = theta[i] + hi;
        let f_plus = f(&x)?;
        x[i] = theta[i] - hi;
        let f_minus = f(&x)?;
        x[i] = theta[i];
        hess[[i, i]] = (f_plus - 2.0 * f0 + f_minus) / (hi * hi);
        for j in 0..i {
            let hj = steps[j];
            let mut corner = |si: f64, sj: f64| -> OptResult<f64> {
                x[i] = theta[i] + si * hi;
                x[j] = theta[j] + sj * hj;
                let v = f(&x);
                x[i] = theta[i];
                x[j] = theta[j];
                v
            };
            let fpp = corner(1.0, 1.0)?;
            let fpm = corner(1.0, -1.0)?;
            let fmp = corner(-1.0, 1.0)?;
            let fmm = corner(-1.0, -1.0)?;
            let hij = (fpp - fpm - fmp + fmm) / (4.0 * hi * hj);
            hess[[i, j]] = hij;
            hess[[j, i]] = hij;
        }
    }
    validate_hessian(&hess, k)?;
    Ok(hess)
}

const EPS_QUARTER: f64 = 1.220_703_125e-4; // f64::EPSILON^(1/4)

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients on a quadratic and error propagation
    //   from the objective closure.
    // - Central-difference Hessians on a quadratic with cross terms, and
    //   propagation of objective errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `run_fd_diff` approximates the gradient of a quadratic.
    //
    // Given
    // -----
    // - f(θ) = θ·θ at θ = [1, −2].
    //
    // Expect
    // ------
    // - ∇f ≈ [2, −4].
    fn run_fd_diff_quadratic_returns_valid_gradient() {
        // Arrange
        let theta = array![1.0, -2.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err).expect("gradient should be valid");

        // Assert
        assert_abs_diff_eq!(grad[0], 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[1], -4.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // An error parked by the objective closure is returned instead of the
    // gradient.
    //
    // Given
    // -----
    // - A closure that records `OptError::NonFiniteCost` and returns NaN.
    //
    // Expect
    // ------
    // - `run_fd_diff` returns that error.
    fn run_fd_diff_closure_error_is_propagated() {
        // Arrange
        let theta = array![0.5];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            closure_err.replace(Some(OptError::NonFiniteCost { value: f64::NAN }.into()));
            f64::NAN
        };

        // Act
        let res = run_fd_diff(&theta, &f, &closure_err);

        // Assert
        assert!(matches!(res, Err(OptError::NonFiniteCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // `compute_hessian` recovers the constant Hessian of a quadratic form,
    // including off-diagonal terms.
    //
    // Given
    // -----
    // - f(x, y) = 3x² + 2xy − y² at (0.4, −1.5).
    //
    // Expect
    // ------
    // - H ≈ [[6, 2], [2, −2]], exactly symmetric.
    fn compute_hessian_quadratic_with_cross_terms() {
        // Arrange
        let f = |t: &Theta| -> OptResult<f64> {
            Ok(3.0 * t[0] * t[0] + 2.0 * t[0] * t[1] - t[1] * t[1])
        };
        let theta = array![0.4, -1.5];

        // Act
        let h = compute_hessian(&f, &theta).expect("hessian should be finite");

        // Assert
        assert_abs_diff_eq!(h[[0, 0]], 6.0, epsilon = 1e-4);
        assert_abs_diff_eq!(h[[1, 1]], -2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(h[[0, 1]], 2.0, epsilon = 1e-4);
        assert_eq!(h[[0, 1]], h[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Errors from the objective abort the Hessian.
    //
    // Given
    // -----
    // - An objective that always fails.
    //
    // Expect
    // ------
    // - The objective's error is returned.
    fn compute_hessian_propagates_objective_errors() {
        let f = |_: &Theta| -> OptResult<f64> { Err(OptError::NonFiniteCost { value: f64::NAN }) };
        let res = compute_hessian(&f, &array![1.0]);
        assert!(matches!(res, Err(OptError::NonFiniteCost { .. })));
    }
}
