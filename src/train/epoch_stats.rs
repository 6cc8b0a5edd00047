use serde::{Deserialize, Serialize};

/// Progress record handed to a training hook, one per example on displayed
/// iterations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 0-based iteration index within the current run.
    pub iteration: usize,
    /// `Network::state_line()` right after the example was trained.
    pub state: String,
    /// Sum-of-squares error of this single example.
    pub error: f64,
}

/// Result of a completed `run_epoch_set` call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochSummary {
    pub iterations: usize,
    /// Mean sum-of-squares error over the example set in the final iteration.
    pub mean_error: f64,
}

/// How a `train_until_success` run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrainingOutcome {
    /// Success and error criteria were both met at iteration `iterations`.
    Converged { iterations: usize },
    /// No meaningful improvement since `last_improvement`.
    Stagnated {
        iterations: usize,
        last_improvement: usize,
        success: f64,
        error: f64,
    },
}

impl TrainingOutcome {
    pub fn is_converged(&self) -> bool {
        matches!(self, TrainingOutcome::Converged { .. })
    }

    pub fn iterations(&self) -> usize {
        match *self {
            TrainingOutcome::Converged { iterations } => iterations,
            TrainingOutcome::Stagnated { iterations, .. } => iterations,
        }
    }
}
