pub mod network;
pub mod topology;

pub use network::{GradientOrder, Network, DEFAULT_LEARNING_RATE};
pub use topology::Topology;
