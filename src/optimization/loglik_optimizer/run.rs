//! Solver execution: drive an Argmin L-BFGS run over a [`LogLikelihood`]
//! and normalize the final state into an [`OptimOutcome`].
use argmin::core::{CostFunction, Executor, Gradient, IterState, Solver, State};
use argmin_math::ArgminL2Norm;
use tracing::debug;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Cost, Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};

type LbfgsState = IterState<Theta, Grad, (), (), (), Cost>;

/// Run `solver` on `problem` from `theta0`.
///
/// The iteration cap comes from `opts.tols.max_iter`. With `opts.verbose`
/// the starting log-likelihood is logged, and with the `obs_slog` feature
/// each iteration is traced as well.
///
/// # Errors
/// - Argmin runtime failures and errors raised by the likelihood, as
///   `OptError`.
/// - Non-finite results rejected by [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    if opts.verbose {
        let start_loglik = -problem.cost(&theta0)?;
        let start_grad = problem.gradient(&theta0).ok().map(|g| g.l2_norm());
        debug!(loglik = start_loglik, grad_norm = ?start_grad, dim = theta0.len(), "MLE start");
    }

    let max_iter = opts.tols.max_iter;
    #[cfg_attr(not(feature = "obs_slog"), allow(unused_mut))]
    let mut executor = Executor::new(problem, solver).configure(|state| {
        let state = state.param(theta0);
        match max_iter {
            Some(n) => state.max_iters(n as u64),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        executor = executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        );
    }

    let mut state = executor.run()?.state().clone();
    OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        state.get_termination_status().clone(),
        state.get_iter(),
        state.get_func_counts().clone(),
        state.take_gradient(),
    )
}
