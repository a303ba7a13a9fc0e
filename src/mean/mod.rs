//! mean — ARIMA conditional-mean estimation.
//!
//! Purpose
//! -------
//! Fit ARIMA(p, d, q) by conditional Gaussian maximum likelihood and expose
//! the one-step-ahead residuals that the volatility stage models.
//!
//! Key behaviors
//! -------------
//! - [`ArimaOrder`] carries `(p, d, q)` (default `(5, 1, 0)`) and the
//!   `p + d + q + 1` minimum-length rule.
//! - [`ArimaModel::fit`] returns an immutable [`MeanModelFit`] with
//!   coefficients, residuals, log-likelihood, AIC/BIC and optional
//!   standard errors.
//!
//! Conventions
//! -----------
//! - A constant is estimated only when `d = 0`.
//! - MA polynomial sign: `y_t = … + e_t + Σ ψ_j e_{t−j}`.

pub mod arima;
pub mod fit;
pub mod init;
pub mod order;
pub mod params;

// ---- Re-exports ----

pub use self::arima::{ArimaModel, ArimaOptions, conditional_residuals};
pub use self::fit::MeanModelFit;
pub use self::order::{ArimaOrder, difference};
pub use self::params::ArimaParams;
