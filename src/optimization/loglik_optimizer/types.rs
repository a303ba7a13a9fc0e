//! loglik_optimizer::types — numeric aliases and solver wiring.
//!
//! Every optimizer module imports these aliases instead of naming `ndarray`
//! or Argmin generics directly:
//!
//! - [`Theta`] / [`Grad`]: length-k vectors in unconstrained space.
//! - [`Hessian`]: dense `k × k` matrix.
//! - [`Cost`]: scalar objective.
//! - [`FnEvalMap`]: Argmin's function-evaluation counters.
//! - L-BFGS aliases for the two supported line searches.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ`.
pub type Theta = Array1<f64>;

/// Gradient vector, same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian, `θ.len() × θ.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Counter name (e.g. `"cost_count"`) to count.
pub type FnEvalMap = HashMap<String, u64>;

/// Default L-BFGS history size.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
