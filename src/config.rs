//! Pipeline configuration.
//!
//! Purpose
//! -------
//! Describe one pipeline run as a serde document so runs can be driven from
//! JSON files. Every field has a default; an empty object `{}` reproduces
//! the standard setup: ARIMA(5, 1, 0), GARCH(1, 1) with Normal innovations,
//! a 10-day horizon and 95% confidence.
//!
//! Key behaviors
//! -------------
//! - [`PipelineConfig::from_json_str`] / [`PipelineConfig::from_path`]
//!   parse and validate a document.
//! - [`PipelineConfig::mean_model`] and [`PipelineConfig::volatility_model`]
//!   turn the document into validated estimators.
//!
//! Invariants & assumptions
//! ------------------------
//! - Unknown keys are rejected.
//! - A loaded config has passed [`PipelineConfig::validate`]; struct
//!   literals built in code should call it before use.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{RiskError, RiskResult},
    mean::{ArimaModel, ArimaOptions, ArimaOrder},
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances},
    risk::ConfidenceLevel,
    volatility::{
        DistributionKind, VarianceGuards, VolatilityFamily, VolatilityModel, VolatilityOptions,
        VolatilityOrders, core::options::DEFAULT_BOUNDARY_TOL,
    },
};

/// Optimizer settings shared by both estimation stages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
}

impl OptimizerConfig {
    /// # Errors
    /// - `InvalidParameter` for invalid tolerances or L-BFGS memory.
    pub fn mle_options(&self) -> RiskResult<MLEOptions> {
        let tols = Tolerances::new(self.tol_grad, self.tol_cost, self.max_iter)?;
        Ok(MLEOptions::new(tols, self.line_searcher, self.verbose, self.lbfgs_mem)?)
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        let tols = Tolerances::default();
        Self {
            tol_grad: tols.tol_grad,
            tol_cost: tols.tol_cost,
            max_iter: tols.max_iter,
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub mean_order: ArimaOrder,
    pub volatility_family: VolatilityFamily,
    pub volatility_orders: VolatilityOrders,
    pub distribution: DistributionKind,
    /// Forecast horizon in trading days.
    pub horizon: usize,
    pub confidence: ConfidenceLevel,
    pub optimizer: OptimizerConfig,
    /// `(min, max)` clamp for in-sample variances.
    pub variance_guards: (f64, f64),
    pub boundary_tol: f64,
    pub compute_std_errors: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let guards = VarianceGuards::default();
        Self {
            mean_order: ArimaOrder::default(),
            volatility_family: VolatilityFamily::Garch,
            volatility_orders: VolatilityOrders::default(),
            distribution: DistributionKind::Normal,
            horizon: 10,
            confidence: ConfidenceLevel::default(),
            optimizer: OptimizerConfig::default(),
            variance_guards: (guards.min, guards.max),
            boundary_tol: DEFAULT_BOUNDARY_TOL,
            compute_std_errors: true,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a JSON document.
    ///
    /// # Errors
    /// - `Config` for malformed JSON, unknown keys or wrongly typed values
    ///   (including a confidence level outside `(0, 1)`).
    /// - Any error of [`PipelineConfig::validate`].
    pub fn from_json_str(json: &str) -> RiskResult<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    ///
    /// # Errors
    /// - `Config` if the file cannot be read.
    /// - Any error of [`PipelineConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> RiskResult<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| RiskError::Config {
            reason: format!("cannot read {}: {e}", path.as_ref().display()),
        })?;
        Self::from_json_str(&text)
    }

    /// Check every field by building the estimators it describes.
    ///
    /// # Errors
    /// - `InvalidParameter` for `horizon = 0`, degenerate volatility orders,
    ///   invalid guards, boundary tolerance or optimizer settings.
    pub fn validate(&self) -> RiskResult<()> {
        if self.horizon == 0 {
            return Err(RiskError::invalid_parameter(
                "horizon",
                self.horizon,
                "Forecast horizon must be at least one step.",
            ));
        }
        self.mean_model()?;
        self.volatility_model()?;
        Ok(())
    }

    /// # Errors
    /// - `InvalidParameter` for invalid optimizer settings.
    pub fn mean_model(&self) -> RiskResult<ArimaModel> {
        let options = ArimaOptions::new(self.optimizer.mle_options()?, self.compute_std_errors);
        Ok(ArimaModel::new(self.mean_order, options))
    }

    /// # Errors
    /// - `InvalidParameter` for invalid orders, guards, tolerances or
    ///   optimizer settings.
    pub fn volatility_model(&self) -> RiskResult<VolatilityModel> {
        let options = VolatilityOptions::new(
            self.optimizer.mle_options()?,
            VarianceGuards::new(self.variance_guards)?,
            self.compute_std_errors,
            self.boundary_tol,
        )?;
        VolatilityModel::new(
            self.volatility_family,
            self.volatility_orders,
            self.distribution,
            options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover defaults, partial documents, and the mapping of
    // parse and validation failures onto `Config` / `InvalidParameter`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An empty document yields the standard setup.
    //
    // Given
    // -----
    // - `{}`.
    //
    // Expect
    // ------
    // - ARIMA(5,1,0), GARCH(1,1) with o ignored, Normal, h = 10, c = 0.95.
    fn empty_document_uses_defaults() {
        // Arrange / Act
        let config = PipelineConfig::from_json_str("{}").expect("defaults are valid");
        let vol = config.volatility_model().expect("valid model");

        // Assert
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.mean_order, ArimaOrder::new(5, 1, 0));
        assert_eq!(vol.family, VolatilityFamily::Garch);
        assert_eq!(vol.orders, VolatilityOrders::new(1, 0, 1));
        assert_eq!(config.horizon, 10);
        assert_eq!(config.confidence.value(), 0.95);
    }

    #[test]
    // Purpose
    // -------
    // Partial documents override only the keys they name, using the
    // lenient spellings for family, distribution and line search.
    //
    // Given
    // -----
    // - EGARCH(1,1,1), Student-t, h = 5, c = 0.99, HagerZhang, max_iter 200.
    //
    // Expect
    // ------
    // - Those values, defaults elsewhere.
    fn partial_document_overrides_named_keys() {
        let json = r#"{
            "volatility_family": "egarch",
            "distribution": "t",
            "horizon": 5,
            "confidence": 0.99,
            "optimizer": {"line_searcher": "hager_zhang", "max_iter": 200}
        }"#;
        let config = PipelineConfig::from_json_str(json).expect("valid document");
        assert_eq!(config.volatility_family, VolatilityFamily::Egarch);
        assert_eq!(config.distribution, DistributionKind::StudentT);
        assert_eq!(config.horizon, 5);
        assert_eq!(config.confidence.value(), 0.99);
        let opts = config.optimizer.mle_options().expect("valid options");
        assert_eq!(opts.line_searcher, LineSearcher::HagerZhang);
        assert_eq!(opts.tols.max_iter, Some(200));
        assert_eq!(opts.tols.tol_grad, Some(1e-6));
        assert_eq!(config.mean_order, ArimaOrder::default());
    }

    #[test]
    // Purpose
    // -------
    // Malformed documents are `Config` errors; well-formed but out-of-domain
    // values are `InvalidParameter`.
    //
    // Given
    // -----
    // - Broken JSON, an unknown key, c = 1.2; then h = 0, GARCH p = 0 and
    //   inverted guards.
    //
    // Expect
    // ------
    // - Three `Config` errors, then three `InvalidParameter` errors.
    fn failures_are_classified() {
        for bad in ["{", r#"{"horizn": 3}"#, r#"{"confidence": 1.2}"#] {
            assert!(
                matches!(PipelineConfig::from_json_str(bad), Err(RiskError::Config { .. })),
                "{bad}"
            );
        }
        for bad in [
            r#"{"horizon": 0}"#,
            r#"{"volatility_orders": {"p": 0, "o": 0, "q": 1}}"#,
            r#"{"variance_guards": [1.0, 0.5]}"#,
        ] {
            assert!(
                matches!(
                    PipelineConfig::from_json_str(bad),
                    Err(RiskError::InvalidParameter { .. })
                ),
                "{bad}"
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // A missing file is a `Config` error naming the path.
    //
    // Given
    // -----
    // - A path that does not exist.
    //
    // Expect
    // ------
    // - `Config` whose reason contains the file name.
    fn missing_file_is_config_error() {
        match PipelineConfig::from_path("/nonexistent/pipeline.json") {
            Err(RiskError::Config { reason }) => assert!(reason.contains("pipeline.json")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }
}
