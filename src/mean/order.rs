//! ARIMA order triple and differencing.
use ndarray::{Array1, ArrayView1, s};
use serde::{Deserialize, Serialize};

/// `(p, d, q)`: AR lags, differencing degree, MA lags.
///
/// Default `(5, 1, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Shortest input series the estimator accepts: `p + d + q + 1`.
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 1
    }

    /// A constant is estimated only for undifferenced series.
    pub fn has_constant(&self) -> bool {
        self.d == 0
    }

    /// Free parameters: constant (if any), AR, MA and the innovation variance.
    pub fn n_params(&self) -> usize {
        usize::from(self.has_constant()) + self.p + self.q + 1
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self { p: 5, d: 1, q: 0 }
    }
}

impl std::fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({}, {}, {})", self.p, self.d, self.q)
    }
}

/// Apply the first difference `d` times.
///
/// Each pass shortens the series by one; a series that runs out of points
/// comes back empty.
pub fn difference(values: ArrayView1<f64>, d: usize) -> Array1<f64> {
    let mut out = values.to_owned();
    for _ in 0..d {
        if out.len() < 2 {
            return Array1::zeros(0);
        }
        out = &out.slice(s![1..]) - &out.slice(s![..-1]);
    }
    out
}
