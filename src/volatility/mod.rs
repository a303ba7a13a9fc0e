//! volatility — GARCH / EGARCH estimation and variance forecasting.
//!
//! Purpose
//! -------
//! Model the conditional variance of mean-model residuals and project it
//! forward for risk measurement.
//!
//! Key behaviors
//! -------------
//! - [`VolatilityModel::fit`] estimates GARCH(p, q) or EGARCH(p, o, q) under
//!   Normal or Student-t innovations (with `ν` estimated jointly) and returns
//!   a [`VolatilityModelFit`] carrying `σ_t` and the terminal
//!   [`VarianceState`].
//! - [`forecast_variance`] (or [`VolatilityModelFit::forecast`]) rolls the
//!   recursion `h` steps ahead.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every GARCH iterate satisfies `Σα + Σβ < 1`; fits on the boundary are
//!   reported as `NonStationary`.
//! - Forecasts are never clamped; a non-positive or non-finite variance is
//!   `NumericalInstability`.

pub mod core;
pub mod models;

// ---- Re-exports ----

pub use self::core::{
    distribution::{Distribution, DistributionKind},
    forecasts::{ForecastResult, forecast_variance},
    guards::VarianceGuards,
    options::VolatilityOptions,
    orders::{VolatilityFamily, VolatilityOrders},
    params::{EgarchParams, GarchParams, VolatilityParams},
    state::VarianceState,
};
pub use self::models::{
    estimator::{VolatilityData, VolatilityModel},
    fit::VolatilityModelFit,
};
