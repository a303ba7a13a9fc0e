//! optimization — pluggable maximum-likelihood machinery.
//!
//! Purpose
//! -------
//! Give every estimator in the crate one way to maximize a log-likelihood.
//! Estimators implement [`loglik_optimizer::LogLikelihood`] and call
//! [`loglik_optimizer::maximize`]; they never touch Argmin types directly.
//!
//! Key behaviors
//! -------------
//! - [`loglik_optimizer`]: the `LogLikelihood` trait, optimizer options,
//!   the Argmin L-BFGS backend, finite-difference derivatives and outcome
//!   normalization.
//! - [`numerical_stability`]: transforms between unconstrained θ and
//!   constrained model parameters.
//! - [`errors`]: [`OptError`] / [`OptResult`].
//!
//! Conventions
//! -----------
//! - The optimizer always maximizes `ℓ(θ)` by minimizing `−ℓ(θ)`.
//! - θ is an `ndarray::Array1<f64>` in unconstrained space; mapping to model
//!   space is the estimator's job.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub use self::errors::{OptError, OptResult};
