//! Volatility estimators and their fitted results.

pub mod estimator;
pub mod fit;
