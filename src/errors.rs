//! errors — crate-wide error taxonomy for the risk pipeline.
//!
//! Every public operation in the crate returns [`RiskResult<T>`]. Variants map
//! one-to-one onto the failure classes callers are expected to branch on:
//!
//! - [`RiskError::InvalidInput`]: malformed or too-short series, bad values.
//! - [`RiskError::InvalidParameter`]: out-of-domain configuration (orders,
//!   confidence level, degrees of freedom, unknown names).
//! - [`RiskError::InsufficientData`]: series too short for the requested orders.
//! - [`RiskError::Convergence`]: the optimizer failed to reach a stable optimum.
//! - [`RiskError::NumericalInstability`]: a computed variance is non-positive
//!   or non-finite.
//! - [`RiskError::NonStationary`]: a GARCH fit sits on the stability boundary.
//! - [`RiskError::DataUnavailable`]: a price provider could not deliver data.
//! - [`RiskError::Config`]: a configuration document could not be read or parsed.
//!
//! Errors are raised where they are detected and propagated unchanged; no
//! module substitutes defaults on failure.
use thiserror::Error;

use crate::optimization::errors::OptError;

/// Result alias used throughout the crate.
pub type RiskResult<T> = Result<T, RiskError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    /// Malformed input data.
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Configuration value outside its admissible domain.
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter { name: &'static str, value: String, reason: &'static str },

    /// Series shorter than the requested model needs.
    #[error("Insufficient data for {model}: need at least {required} observations, got {actual}")]
    InsufficientData { model: &'static str, required: usize, actual: usize },

    /// Maximum-likelihood estimation did not converge.
    #[error("{model} estimation did not converge: {reason}")]
    Convergence { model: &'static str, reason: String },

    /// A variance left the positive finite reals.
    #[error("Numerical instability at step {step}: variance = {value}")]
    NumericalInstability { step: usize, value: f64 },

    /// Fitted GARCH persistence is on (or past) the stationarity boundary.
    #[error("Fitted volatility model is not stationary: persistence = {persistence}")]
    NonStationary { persistence: f64 },

    /// Data provider failure (network, credential, unknown instrument).
    #[error("Data unavailable for '{instrument}': {reason}")]
    DataUnavailable { instrument: String, reason: String },

    /// Configuration document could not be read or deserialized.
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

impl RiskError {
    /// Shorthand for [`RiskError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        RiskError::InvalidInput { reason: reason.into() }
    }

    /// Shorthand for [`RiskError::InvalidParameter`].
    pub fn invalid_parameter(
        name: &'static str, value: impl std::fmt::Display, reason: &'static str,
    ) -> Self {
        RiskError::InvalidParameter { name, value: value.to_string(), reason }
    }

    /// Attach a model label to an optimizer failure.
    ///
    /// Option-validation failures keep their `InvalidParameter` class; any
    /// other optimizer failure becomes [`RiskError::Convergence`] for `model`.
    pub fn from_optimizer(model: &'static str, err: OptError) -> Self {
        match RiskError::from(err) {
            RiskError::Convergence { reason, .. } => RiskError::Convergence { model, reason },
            other => other,
        }
    }
}

impl From<OptError> for RiskError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::InvalidTolGrad { tol, reason } => {
                RiskError::InvalidParameter { name: "tol_grad", value: tol.to_string(), reason }
            }
            OptError::InvalidTolCost { tol, reason } => {
                RiskError::InvalidParameter { name: "tol_cost", value: tol.to_string(), reason }
            }
            OptError::InvalidMaxIter { max_iter, reason } => RiskError::InvalidParameter {
                name: "max_iter",
                value: max_iter.to_string(),
                reason,
            },
            OptError::NoTolerancesProvided => RiskError::InvalidParameter {
                name: "tolerances",
                value: "none".to_string(),
                reason: "At least one stopping rule must be provided.",
            },
            OptError::InvalidLineSearch { name, reason } => {
                RiskError::InvalidParameter { name: "line_searcher", value: name, reason }
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                RiskError::InvalidParameter { name: "lbfgs_mem", value: mem.to_string(), reason }
            }
            other => RiskError::Convergence { model: "optimizer", reason: other.to_string() },
        }
    }
}

impl From<serde_json::Error> for RiskError {
    fn from(err: serde_json::Error) -> Self {
        RiskError::Config { reason: err.to_string() }
    }
}
