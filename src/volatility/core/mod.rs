//! Core building blocks shared by the volatility estimator and forecaster.
//!
//! - [`orders`]: model family and `(p, o, q)` lag orders.
//! - [`distribution`]: Normal / Student-t innovation laws.
//! - [`params`]: GARCH and EGARCH parameters and their θ encoding.
//! - [`guards`]: variance bounds for the in-sample recursion.
//! - [`recursion`]: conditional-variance paths and the likelihood.
//! - [`state`]: terminal recursion state handed to the forecaster.
//! - [`forecasts`]: h-step variance forecasts.
//! - [`options`]: estimation options.

pub mod distribution;
pub mod forecasts;
pub mod guards;
pub mod options;
pub mod orders;
pub mod params;
pub mod recursion;
pub mod state;
