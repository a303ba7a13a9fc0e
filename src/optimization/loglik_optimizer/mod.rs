//! loglik_optimizer — Argmin-backed log-likelihood maximization.
//!
//! Purpose
//! -------
//! Give every estimator in the crate one way to fit parameters: implement
//! [`LogLikelihood`] on an unconstrained parameter vector and call
//! [`maximize`]. The mean model, both volatility models, and their Student-t
//! variants all go through this path.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] turns `ℓ(θ)` into the cost `c(θ) = −ℓ(θ)`.
//! - [`maximize`] validates `θ₀`, builds L-BFGS for the chosen
//!   [`LineSearcher`] via [`builders`], runs it via [`run::run_lbfgs`], and
//!   returns an [`OptimOutcome`].
//! - [`finite_diff`] supplies gradients when a model has no analytic one and
//!   the central-difference Hessian used for standard errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models implement `ℓ(θ)`, never the cost.
//! - Invalid parameter vectors surface as [`OptError`](crate::optimization::OptError),
//!   not panics.
//! - Constrained-to-unconstrained mappings live in the model layer (see
//!   [`numerical_stability`](crate::optimization::numerical_stability)).
//!
//! Testing notes
//! -------------
//! - Submodule tests cover sign conventions, solver construction,
//!   finite-difference derivatives, validation and outcome mapping.
//! - Estimator tests in `mean` and `volatility` exercise [`maximize`] on
//!   simulated data.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports ----

pub use self::api::maximize;
pub use self::finite_diff::compute_hessian;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
