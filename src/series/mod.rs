//! series — date-indexed containers and the price-to-return transform.
//!
//! - [`TimeSeries`]: validated `(dates, values)` pair shared by returns,
//!   residuals, conditional volatilities and VaR thresholds.
//! - [`PriceSeries`]: positive prices, built directly or from raw provider
//!   rows via [`PriceSeries::from_observations`].
//! - [`pct_change`]: simple returns from prices.
//! - [`TimeSeries::inner_join`]: date alignment used before any arithmetic
//!   on two series.

pub mod price;
pub mod returns;
pub mod timeseries;

// ---- Re-exports ----

pub use self::price::PriceSeries;
pub use self::returns::pct_change;
pub use self::timeseries::{
    AlignedPair, HistoricalVarSeries, ResidualSeries, ReturnSeries, TimeSeries, VolatilitySeries,
};
