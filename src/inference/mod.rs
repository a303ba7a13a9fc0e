//! inference — post-estimation uncertainty for fitted models.
//!
//! Fitted mean and volatility models report standard errors computed from
//! the observed information of their average log-likelihood at the
//! estimate, on the natural (constrained) parameter scale. See
//! [`hessian::calc_standard_errors`].

pub mod hessian;

// ---- Re-exports ----

pub use self::hessian::calc_standard_errors;
