//! High-level entry point for maximizing a [`LogLikelihood`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};
use tracing::debug;

/// Maximize `ℓ(θ)` with L-BFGS and the configured line search.
///
/// # Behavior
/// - Validates `theta0` via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an [`ArgMinAdapter`] that minimizes `−ℓ(θ)`.
/// - Builds the L-BFGS solver for `opts.line_searcher` and runs it.
///
/// # Errors
/// - Propagates errors from `f.check`, the builders and the run.
///
/// # Returns
/// An [`OptimOutcome`]. A run that stops on the iteration budget still
/// returns `Ok` with `converged == false`; estimators decide what that
/// means for them.
///
/// # Example
/// ```no_run
/// use commodity_risk::optimization::{
///     OptResult,
///     loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize},
/// };
/// use ndarray::array;
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), commodity_risk::optimization::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    let outcome = match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }?;
    debug!(
        status = %outcome.status,
        iterations = outcome.iterations,
        loglik = outcome.value,
        converged = outcome.converged,
        "optimizer finished"
    );
    Ok(outcome)
}
