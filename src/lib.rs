//! commodity_risk — conditional-volatility risk measurement for commodity
//! price series.
//!
//! Purpose
//! -------
//! Turn a daily price history into risk numbers: simple returns, an ARIMA
//! conditional mean, a GARCH or EGARCH conditional variance with Normal or
//! Student-t innovations, multi-step variance forecasts, parametric
//! Value-at-Risk and Expected Shortfall, and an exception backtest of the
//! fitted volatility.
//!
//! Key behaviors
//! -------------
//! - Each stage is usable on its own ([`mean::ArimaModel`],
//!   [`volatility::VolatilityModel`], [`risk::RiskMetricCalculator`],
//!   [`backtest::backtest_var`]); [`pipeline::RiskPipeline`] chains them.
//! - Estimators are immutable; fitting returns a fresh result value.
//! - Every operation returns [`errors::RiskResult`].
//!
//! Conventions
//! -----------
//! - Returns are decimal fractions (`0.01` = 1%).
//! - VaR and ES are positive loss magnitudes in return units; an exception
//!   is a return below `−VaR`.
//! - Logging goes through `tracing`; see [`logging::init_logging`].

pub mod backtest;
pub mod config;
pub mod errors;
pub mod inference;
pub mod logging;
pub mod mean;
pub mod optimization;
pub mod pipeline;
pub mod provider;
pub mod risk;
pub mod series;
pub mod volatility;

/// Commonly used types.
pub mod prelude {
    pub use crate::backtest::{BacktestResult, backtest_var};
    pub use crate::config::PipelineConfig;
    pub use crate::errors::{RiskError, RiskResult};
    pub use crate::mean::{ArimaModel, ArimaOrder, MeanModelFit};
    pub use crate::pipeline::{PipelineReport, ReportRow, RiskPipeline};
    pub use crate::provider::{InMemoryProvider, Instrument, PriceProvider};
    pub use crate::risk::{ConfidenceLevel, RiskMetricCalculator, RiskMetrics};
    pub use crate::series::{PriceSeries, ReturnSeries, TimeSeries, pct_change};
    pub use crate::volatility::{
        Distribution, DistributionKind, ForecastResult, VolatilityFamily, VolatilityModel,
        VolatilityModelFit, VolatilityOrders,
    };
}
