//! numerical_stability — numerically robust parameter transforms.
//!
//! Purpose
//! -------
//! Collect the scalar and vector transforms that move model parameters
//! between unconstrained optimizer space and their admissible regions, plus
//! the small tolerances shared by the optimizer and inference layers.
//!
//! Key behaviors
//! -------------
//! - Positive scalars (`ω`, degrees of freedom above their floor) go through
//!   `safe_softplus` / `safe_softplus_inv`.
//! - GARCH `(α, β)` live on a scaled simplex via `safe_softmax` /
//!   `inverse_softmax`, which keeps `Σα + Σβ < 1 − STATIONARITY_MARGIN` for
//!   every iterate.
//! - Autoregressive polynomials (ARIMA AR and MA terms, EGARCH β) go through
//!   `pacf_to_coefficients` / `coefficients_to_pacf`, which keep every
//!   iterate stationary (or invertible).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; shape checks happen in the model layers.
//! - Inverse maps clamp into the interior of the admissible region so that a
//!   boundary starting value still yields a finite θ.
//!
//! Conventions
//! -----------
//! - Pure functions over `ndarray` values; no logging, no I/O.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check agreement with naive formulas,
//!   simplex mass conservation, stationarity of the AR map, and that each
//!   inverse recovers its input.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, LOGIT_EPS, PACF_CLAMP, STATIONARITY_MARGIN, coefficients_to_pacf, inverse_softmax,
    pacf_to_coefficients, safe_softmax, safe_softplus, safe_softplus_inv,
};
