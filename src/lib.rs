//! A single-hidden-layer sigmoid network trained with online backpropagation,
//! plus a training controller with convergence and stagnation detection.

pub mod activation;
pub mod error;
pub mod math;
pub mod network;
pub mod rng;
pub mod train;

// Convenience re-exports
pub use error::{ConfigError, EpochError, NetworkError, TopologyError, VectorKind};
pub use math::matrix::Matrix;
pub use network::{GradientOrder, Network, Topology, DEFAULT_LEARNING_RATE};
pub use train::{
    evaluate, run_epoch_set, train_until_success, EpochSummary, Example, Snapshot, TrainConfig,
    TrainingOutcome,
};
