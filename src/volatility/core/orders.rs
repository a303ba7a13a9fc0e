//! Volatility model family and lag orders.
//!
//! Conventions
//! -----------
//! - `p`: lags of the shock term (`α`), `o`: lags of the asymmetric term
//!   (`γ`, EGARCH only), `q`: lags of the variance term (`β`).
//! - GARCH ignores `o`; it is reported as zero in fitted orders.
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::{RiskError, RiskResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityFamily {
    #[serde(alias = "GARCH", alias = "garch")]
    Garch,
    #[serde(alias = "EGARCH", alias = "egarch")]
    Egarch,
}

impl VolatilityFamily {
    /// Upper-case label used in logs and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            VolatilityFamily::Garch => "GARCH",
            VolatilityFamily::Egarch => "EGARCH",
        }
    }
}

impl std::fmt::Display for VolatilityFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VolatilityFamily {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "garch" => Ok(VolatilityFamily::Garch),
            "egarch" => Ok(VolatilityFamily::Egarch),
            _ => Err(RiskError::invalid_parameter(
                "volatility_family",
                s,
                "Valid options are 'GARCH' or 'EGARCH' (case insensitive).",
            )),
        }
    }
}

/// `(p, o, q)` lag orders. Default `(1, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolatilityOrders {
    pub p: usize,
    pub o: usize,
    pub q: usize,
}

impl VolatilityOrders {
    pub fn new(p: usize, o: usize, q: usize) -> Self {
        Self { p, o, q }
    }

    /// Orders the recursion actually uses for `family` (`o = 0` for GARCH).
    ///
    /// # Errors
    /// - `InvalidParameter` if GARCH has `p = 0`, or EGARCH has
    ///   `p + o = 0` (no shock enters the recursion).
    pub fn effective(&self, family: VolatilityFamily) -> RiskResult<Self> {
        match family {
            VolatilityFamily::Garch => {
                if self.p == 0 {
                    return Err(RiskError::invalid_parameter(
                        "p",
                        self.p,
                        "GARCH needs at least one shock lag (p >= 1).",
                    ));
                }
                Ok(Self { p: self.p, o: 0, q: self.q })
            }
            VolatilityFamily::Egarch => {
                if self.p + self.o == 0 {
                    return Err(RiskError::invalid_parameter(
                        "p + o",
                        self.p + self.o,
                        "EGARCH needs at least one shock lag (p + o >= 1).",
                    ));
                }
                Ok(*self)
            }
        }
    }

    /// Longest lag in the recursion.
    pub fn max_lag(&self) -> usize {
        self.p.max(self.o).max(self.q)
    }

    /// Shortest residual series accepted: `max(p, o, q) + 1`.
    pub fn min_observations(&self) -> usize {
        self.max_lag() + 1
    }
}

impl Default for VolatilityOrders {
    fn default() -> Self {
        Self { p: 1, o: 1, q: 1 }
    }
}

impl std::fmt::Display for VolatilityOrders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.p, self.o, self.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Family names parse case-insensitively; unknown names are rejected.
    //
    // Given
    // -----
    // - "garch", "EGarch", "figarch".
    //
    // Expect
    // ------
    // - Two families and one `InvalidParameter`.
    fn family_parses_case_insensitively() {
        assert_eq!("garch".parse::<VolatilityFamily>(), Ok(VolatilityFamily::Garch));
        assert_eq!("EGarch".parse::<VolatilityFamily>(), Ok(VolatilityFamily::Egarch));
        assert!(matches!(
            "figarch".parse::<VolatilityFamily>(),
            Err(RiskError::InvalidParameter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // GARCH drops `o`; degenerate orders are rejected per family.
    //
    // Given
    // -----
    // - (1, 1, 1) for GARCH; (0, 1, 1) for both families; (0, 0, 1) for
    //   EGARCH.
    //
    // Expect
    // ------
    // - GARCH (1, 0, 1); GARCH (0, ·, ·) invalid; EGARCH (0, 1, 1) valid;
    //   EGARCH (0, 0, 1) invalid.
    fn effective_orders_follow_family_rules() {
        let garch = VolatilityOrders::new(1, 1, 1)
            .effective(VolatilityFamily::Garch)
            .expect("GARCH(1,1) is valid");
        assert_eq!(garch, VolatilityOrders::new(1, 0, 1));
        assert!(VolatilityOrders::new(0, 1, 1).effective(VolatilityFamily::Garch).is_err());
        assert!(VolatilityOrders::new(0, 1, 1).effective(VolatilityFamily::Egarch).is_ok());
        assert!(VolatilityOrders::new(0, 0, 1).effective(VolatilityFamily::Egarch).is_err());
    }
}
