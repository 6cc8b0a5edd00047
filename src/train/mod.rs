pub mod epoch_stats;
pub mod evaluate;
pub mod example;
pub mod loop_fn;
pub mod train_config;

pub use epoch_stats::{EpochSummary, Snapshot, TrainingOutcome};
pub use evaluate::{evaluate, round_output};
pub use example::{xor, Example};
pub use loop_fn::{log_snapshot, run_epoch_set, train_until_success};
pub use train_config::TrainConfig;
