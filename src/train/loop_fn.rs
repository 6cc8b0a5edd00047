use log::{debug, info, warn};

use crate::error::{EpochError, NetworkError};
use crate::network::network::Network;
use crate::train::epoch_stats::{EpochSummary, Snapshot, TrainingOutcome};
use crate::train::evaluate::evaluate;
use crate::train::example::Example;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` online for `iterations` passes over `examples`.
///
/// Each pass presents every example in order (load, activate, train). The
/// returned summary carries the mean sum-of-squares error of the **last**
/// pass.
///
/// # Snapshots
/// With `print_every > 0`, passes whose index is a multiple of `print_every`
/// (pass 0 included) call `hook` once per example. `print_every == 0` never
/// calls it.
///
/// # Errors
/// A shape mismatch aborts the run on the spot. The error reports how many
/// passes had fully completed and the mean error of the last of them.
pub fn run_epoch_set<H>(
    network: &mut Network,
    examples: &[Example],
    iterations: usize,
    print_every: usize,
    mut hook: H,
) -> Result<EpochSummary, EpochError>
where
    H: FnMut(&Snapshot),
{
    let mut mean_error = 0.0;

    for iteration in 0..iterations {
        let display = print_every != 0 && iteration % print_every == 0;

        mean_error = run_iteration(network, examples, iteration, display, &mut hook)
            .map_err(move |source| EpochError {
                iterations_completed: iteration,
                mean_error,
                source,
            })?;
    }

    Ok(EpochSummary { iterations, mean_error })
}

/// Trains one pass at a time until the network classifies `examples`
/// successfully with low error, or until progress stalls.
///
/// After every pass the success fraction and mean error are checked against
/// `config`. The relative error change is measured against the error recorded
/// at the last improvement; once more than `config.stagnation_window` passes
/// go by without one, the run ends as [`TrainingOutcome::Stagnated`]. This
/// bounds the run even when the network can never converge.
///
/// `update_every` works like `print_every` in [`run_epoch_set`], counted over
/// the whole run.
pub fn train_until_success<H>(
    network: &mut Network,
    examples: &[Example],
    update_every: usize,
    config: &TrainConfig,
    mut hook: H,
) -> Result<TrainingOutcome, EpochError>
where
    H: FnMut(&Snapshot),
{
    let mut iteration = 0;
    let mut last_improvement = 0;
    let mut last_error = 0.0;
    let mut previous_error = 0.0;

    loop {
        let display = update_every != 0 && iteration % update_every == 0;
        let abort = |source: NetworkError| EpochError {
            iterations_completed: iteration,
            mean_error: previous_error,
            source,
        };

        let error = run_iteration(network, examples, iteration, display, &mut hook).map_err(abort)?;
        let success = evaluate(network, examples).map_err(abort)?;

        if success > config.success_threshold && error < config.error_threshold {
            info!("network fully trained after {iteration} iterations");
            return Ok(TrainingOutcome::Converged { iterations: iteration });
        }

        if improvement(error, last_error) > config.improvement_threshold {
            last_improvement = iteration;
            last_error = error;
        } else if iteration - last_improvement > config.stagnation_window {
            warn!(
                "stagnation detected: no change since {last_improvement} with current generation {iteration}"
            );
            debug!("{iteration:10}> SUCC: {success:3.2}\t ERR: {error:8.5}");
            return Ok(TrainingOutcome::Stagnated {
                iterations: iteration,
                last_improvement,
                success,
                error,
            });
        }

        previous_error = error;
        iteration += 1;
    }
}

/// Hook that writes each snapshot through the `log` facade at `info` level.
pub fn log_snapshot(snapshot: &Snapshot) {
    info!(
        "{:5}> {} | err: {:2.3}",
        snapshot.iteration, snapshot.state, snapshot.error
    );
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One pass over the example set. Returns the mean sum-of-squares error.
fn run_iteration<H>(
    network: &mut Network,
    examples: &[Example],
    iteration: usize,
    display: bool,
    hook: &mut H,
) -> Result<f64, NetworkError>
where
    H: FnMut(&Snapshot),
{
    if examples.is_empty() {
        return Ok(0.0);
    }

    let mut sos_error = 0.0;
    for example in examples {
        network.load_inputs(&example.inputs)?;
        network.activate();
        let sos = network.train(&example.expected)?;
        sos_error += sos;

        if display {
            hook(&Snapshot {
                iteration,
                state: network.state_line(),
                error: sos,
            });
        }
    }

    Ok(sos_error / examples.len() as f64)
}

/// Relative change of `current` against `previous`. NaN when both are zero.
fn improvement(current: f64, previous: f64) -> f64 {
    ((current - previous) / current).abs()
}
