//! pipeline — end-to-end risk run for one price series.
//!
//! Purpose
//! -------
//! Chain the stages in order: prices → simple returns → ARIMA residuals →
//! conditional-volatility fit → variance forecast → VaR/ES → backtest.
//!
//! Key behaviors
//! -------------
//! - The mean model is fit on returns; the volatility model on its
//!   residuals.
//! - Headline VaR/ES use the one-step-ahead variance; the full forecast
//!   path is reported alongside.
//! - The backtest compares realized returns with the in-sample `σ_t`
//!   under the fitted innovation law.
//! - [`PipelineReport::rows`] produces the export table: one row per return
//!   date with the volatility and VaR where they exist.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every stage error propagates unchanged; no partial report is built.
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::{
    backtest::{BacktestResult, backtest_var},
    config::PipelineConfig,
    errors::{RiskError, RiskResult},
    mean::{ArimaModel, MeanModelFit},
    provider::{Instrument, PriceProvider},
    risk::{RiskMetricCalculator, RiskMetrics},
    series::{PriceSeries, ReturnSeries, TimeSeries, pct_change},
    volatility::{ForecastResult, VolatilityModel, VolatilityModelFit},
};

/// Validated estimators plus the run settings they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPipeline {
    config: PipelineConfig,
    mean: ArimaModel,
    volatility: VolatilityModel,
}

impl RiskPipeline {
    /// # Errors
    /// - See [`PipelineConfig::validate`].
    pub fn new(config: PipelineConfig) -> RiskResult<Self> {
        config.validate()?;
        let mean = config.mean_model()?;
        let volatility = config.volatility_model()?;
        Ok(Self { config, mean, volatility })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage on `prices`.
    ///
    /// # Errors
    /// - Any stage error, unchanged: `InvalidInput` / `InsufficientData`
    ///   for short or degenerate series, `Convergence`, `NonStationary`,
    ///   `NumericalInstability`.
    pub fn run(&self, prices: &PriceSeries) -> RiskResult<PipelineReport> {
        let returns = pct_change(prices)?;
        let mean_fit = self.mean.fit(&returns)?;
        let volatility_fit = self.volatility.fit(&mean_fit.residuals)?;
        let forecast = volatility_fit.forecast(self.config.horizon)?;

        let calc = RiskMetricCalculator::new(volatility_fit.distribution, self.config.confidence)?;
        let one_step = forecast.one_step().ok_or_else(|| {
            RiskError::invalid_input("variance forecast produced no steps")
        })?;
        let headline = calc.metrics(one_step)?;
        let metrics_path = calc.metrics_path(&forecast)?;
        let backtest = backtest_var(
            &returns,
            &volatility_fit.conditional_volatility,
            volatility_fit.distribution,
            self.config.confidence,
        )?;

        info!(
            observations = returns.len(),
            var = headline.var,
            es = headline.es,
            confidence = %self.config.confidence,
            exceptions = backtest.exceptions,
            "risk pipeline complete"
        );
        Ok(PipelineReport {
            instrument: None,
            returns,
            mean_fit,
            volatility_fit,
            forecast,
            headline,
            metrics_path,
            backtest,
        })
    }

    /// Fetch `instrument` from `provider` and [`run`](Self::run) on it.
    ///
    /// # Errors
    /// - `DataUnavailable` from the provider, otherwise as [`run`](Self::run).
    pub fn run_for_instrument<P: PriceProvider + ?Sized>(
        &self, provider: &P, instrument: Instrument, credential: &str,
    ) -> RiskResult<PipelineReport> {
        let prices = provider.fetch(instrument, credential)?;
        info!(%instrument, prices = prices.len(), "price history loaded");
        let mut report = self.run(&prices)?;
        report.instrument = Some(instrument);
        Ok(report)
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Set when the run started from a provider.
    pub instrument: Option<Instrument>,
    pub returns: ReturnSeries,
    pub mean_fit: MeanModelFit,
    pub volatility_fit: VolatilityModelFit,
    pub forecast: ForecastResult,
    /// VaR/ES on the one-step-ahead variance.
    pub headline: RiskMetrics,
    /// VaR/ES at each forecast step.
    pub metrics_path: Vec<RiskMetrics>,
    pub backtest: BacktestResult,
}

/// One line of the export table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub return_value: f64,
    pub conditional_volatility: Option<f64>,
    pub historical_var: Option<f64>,
}

impl PipelineReport {
    /// Returns, conditional volatility and historical VaR keyed by return
    /// date. Dates the models drop (the first `d` from differencing) carry
    /// `None`.
    pub fn rows(&self) -> Vec<ReportRow> {
        let vol = &self.volatility_fit.conditional_volatility;
        let var = &self.backtest.historical_var;
        self.returns
            .iter()
            .map(|(date, r)| ReportRow {
                date,
                return_value: r,
                conditional_volatility: value_on(vol, date),
                historical_var: value_on(var, date),
            })
            .collect()
    }
}

fn value_on(series: &TimeSeries, date: NaiveDate) -> Option<f64> {
    series.dates().binary_search(&date).ok().map(|i| series.values()[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::InMemoryProvider;
    use chrono::Duration;
    use ndarray::Array1;
    use rand::{SeedableRng, distributions::Distribution as _, rngs::StdRng};
    use statrs::distribution::Normal;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover stage wiring on a simulated price path, the export
    // rows, and error propagation from short series and providers.
    // -------------------------------------------------------------------------

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date")
    }

    /// Prices driven by GARCH(1,1) returns.
    fn simulated_prices(n: usize, seed: u64) -> PriceSeries {
        let normal = Normal::new(0.0, 1.0).expect("valid normal");
        let mut rng = StdRng::seed_from_u64(seed);
        let (omega, alpha, beta) = (2e-6, 0.08, 0.9);
        let mut sigma2: f64 = omega / (1.0 - alpha - beta);
        let mut price = 50.0;
        let mut prices = Vec::with_capacity(n);
        for _ in 0..n {
            let eps = sigma2.sqrt() * normal.sample(&mut rng);
            price *= 1.0 + eps;
            prices.push(price);
            sigma2 = omega + alpha * eps * eps + beta * sigma2;
        }
        let dates = (0..n).map(|i| start() + Duration::days(i as i64)).collect();
        PriceSeries::new(dates, Array1::from(prices)).expect("positive prices")
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig { mean_order: crate::mean::ArimaOrder::new(1, 0, 0), ..Default::default() }
    }

    #[test]
    // Purpose
    // -------
    // A full run wires every stage and reports consistent shapes.
    //
    // Given
    // -----
    // - 1500 simulated GARCH prices, AR(1) mean, default volatility setup.
    //
    // Expect
    // ------
    // - Horizon-10 path whose first step equals the headline; ES > VaR > 0;
    //   backtest over every residual date; one row per return.
    fn run_produces_consistent_report() {
        // Arrange
        let pipeline = RiskPipeline::new(small_config()).expect("valid config");
        let prices = simulated_prices(1500, 11);

        // Act
        let report = pipeline.run(&prices).expect("pipeline run");

        // Assert
        assert_eq!(report.returns.len(), 1499);
        assert_eq!(report.forecast.horizon, 10);
        assert_eq!(report.metrics_path.len(), 10);
        assert_eq!(report.metrics_path[0], report.headline);
        assert!(report.headline.var > 0.0);
        assert!(report.headline.es > report.headline.var);
        assert_eq!(report.backtest.n_obs, report.volatility_fit.conditional_volatility.len());
        let rows = report.rows();
        assert_eq!(rows.len(), report.returns.len());
        assert!(rows.iter().all(|r| r.historical_var.is_some()));
        assert!(report.instrument.is_none());
    }

    #[test]
    // Purpose
    // -------
    // Differencing drops leading residual dates; rows keep them with gaps.
    //
    // Given
    // -----
    // - ARIMA(1,1,0) on 800 simulated prices.
    //
    // Expect
    // ------
    // - The first row has no volatility or VaR; the second has both.
    fn rows_mark_dates_without_model_output() {
        let config = PipelineConfig {
            mean_order: crate::mean::ArimaOrder::new(1, 1, 0),
            ..Default::default()
        };
        let report = RiskPipeline::new(config)
            .expect("valid config")
            .run(&simulated_prices(800, 5))
            .expect("pipeline run");
        let rows = report.rows();
        assert_eq!(rows[0].conditional_volatility, None);
        assert_eq!(rows[0].historical_var, None);
        assert!(rows[1].conditional_volatility.is_some());
        assert!(rows[1].historical_var.is_some());

        let json = serde_json::to_value(rows[1]).expect("serializable row");
        assert!(json.get("return").is_some());
    }

    #[test]
    // Purpose
    // -------
    // Stage and provider errors reach the caller unchanged.
    //
    // Given
    // -----
    // - Default ARIMA(5,1,0) on 6 prices (5 returns); a provider without
    //   data; a config with horizon 0.
    //
    // Expect
    // ------
    // - `InsufficientData`, `DataUnavailable`, `InvalidParameter`.
    fn errors_propagate() {
        let pipeline = RiskPipeline::new(PipelineConfig::default()).expect("valid config");
        assert!(matches!(
            pipeline.run(&simulated_prices(6, 1)),
            Err(RiskError::InsufficientData { model: "ARIMA", .. })
        ));
        assert!(matches!(
            pipeline.run_for_instrument(&InMemoryProvider::new(), Instrument::Wti, "key"),
            Err(RiskError::DataUnavailable { .. })
        ));
        assert!(matches!(
            RiskPipeline::new(PipelineConfig { horizon: 0, ..Default::default() }),
            Err(RiskError::InvalidParameter { name: "horizon", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Estimators and results can cross threads.
    //
    // Given
    // -----
    // - The pipeline, report and stage result types.
    //
    // Expect
    // ------
    // - All are `Send + Sync` (checked at compile time).
    fn pipeline_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RiskPipeline>();
        assert_send_sync::<PipelineReport>();
        assert_send_sync::<InMemoryProvider>();
    }
}
