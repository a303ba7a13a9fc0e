//! inference::hessian — observed-information standard errors.
//!
//! Purpose
//! -------
//! Turn a fitted model's average log-likelihood, evaluated on its *natural*
//! parameters, into per-parameter standard errors.
//!
//! Key behaviors
//! -------------
//! - [`compute_hessian`] gives `H = ∇²ℓ̄(θ̂)` by central differences.
//! - The observed information per observation is `J = −H`; it is copied
//!   into a `nalgebra::DMatrix` and decomposed with `symmetric_eigen`.
//! - `Var(θ̂_i) = [J⁺]_ii / n`, with `J⁺` the eigenvalue-truncated
//!   pseudoinverse.
//!
//! Invariants & assumptions
//! ------------------------
//! - `f` is the **average** log-likelihood, so dividing by `n_obs` gives the
//!   variance of the estimator.
//! - Eigenvalues at most [`EIGEN_EPS`] are dropped; weakly identified
//!   directions therefore get *no* contribution rather than an infinite one.
//!
//! Testing notes
//! -------------
//! - A Gaussian mean/variance likelihood with known Fisher information
//!   checks the scaling; a quadratic with a singular direction checks the
//!   truncation.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{Hessian, Theta, compute_hessian},
    numerical_stability::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::Array1;

/// Standard errors from the observed information of an average
/// log-likelihood.
///
/// Parameters
/// ----------
/// - `f`: `θ ↦ ℓ̄(θ)`, the average log-likelihood on natural parameters.
/// - `theta_hat`: the estimate.
/// - `n_obs`: number of observations that entered `ℓ̄`.
///
/// Returns
/// -------
/// Length-`θ̂.len()` vector of standard errors.
///
/// Errors
/// ------
/// - Any error from `f` or from Hessian validation.
///
/// Notes
/// -----
/// - Directions with non-positive curvature of `−ℓ̄` are truncated, so a
///   fit on a flat or saddle region reports understated rather than
///   infinite SEs along them.
pub fn calc_standard_errors<F: Fn(&Theta) -> OptResult<f64>>(
    f: &F, theta_hat: &Theta, n_obs: usize,
) -> OptResult<Array1<f64>> {
    let k = theta_hat.len();
    let hess = compute_hessian(f, theta_hat)?;
    let mut obs_info = DMatrix::<f64>::zeros(k, k);
    fill_dmatrix(&hess, &mut obs_info);
    let mut se = solve_for_variance(obs_info, k);
    let scale = 1.0 / n_obs.max(1) as f64;
    se.mapv_inplace(|v| (v * scale).sqrt());
    Ok(se)
}

// ---- Helper methods ----

/// Copy `−H` into `obs_info`, column by column.
fn fill_dmatrix(hess: &Hessian, obs_info: &mut DMatrix<f64>) {
    let n = hess.ncols();
    for j in 0..n {
        for i in 0..n {
            obs_info[(i, j)] = -hess[[i, j]];
        }
    }
}

/// Diagonal of the truncated pseudoinverse:
/// `Σ_{k: λ_k > EIGEN_EPS} Q[i,k]² / λ_k`.
fn solve_for_variance(obs_info: DMatrix<f64>, n: usize) -> Array1<f64> {
    let eigen = obs_info.symmetric_eigen();
    let q = eigen.eigenvectors;
    let lambdas = eigen.eigenvalues;
    let mut var = Array1::<f64>::zeros(n);
    for i in 0..n {
        var[i] = lambdas
            .iter()
            .enumerate()
            .filter(|(_, lambda)| **lambda > EIGEN_EPS)
            .map(|(k, &lambda)| q[(i, k)] * q[(i, k)] / lambda)
            .sum();
    }
    var
}
