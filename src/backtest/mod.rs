//! backtest — historical VaR exception counting.
//!
//! - [`backtest_var`]: aligns realized returns with fitted `σ_t`, builds the
//!   positive VaR threshold series and counts losses beyond it.
//! - [`kupiec_pof`]: proportion-of-failures likelihood-ratio test on the
//!   exception count.

pub mod exceptions;
pub mod kupiec;

// ---- Re-exports ----

pub use self::exceptions::{BacktestResult, backtest_var};
pub use self::kupiec::{KupiecTest, kupiec_pof};
