use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Stopping criteria for `train_until_success`.
///
/// # Fields
/// - `success_threshold`     — fraction of correctly classified examples that
///                             must be exceeded
/// - `error_threshold`       — mean sum-of-squares error that must be undercut
/// - `stagnation_window`     — iterations without a meaningful improvement
///                             after which the run is declared stagnant
/// - `improvement_threshold` — minimum relative error change that counts as an
///                             improvement
///
/// Missing fields in JSON fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub success_threshold: f64,
    pub error_threshold: f64,
    pub stagnation_window: usize,
    pub improvement_threshold: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            success_threshold: 0.9,
            error_threshold: 0.01,
            stagnation_window: 10_000,
            improvement_threshold: 0.001,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.success_threshold) {
            return Err(ConfigError::OutOfRange {
                field: "success_threshold",
                value: self.success_threshold,
            });
        }
        if !self.error_threshold.is_finite() || self.error_threshold < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "error_threshold",
                value: self.error_threshold,
            });
        }
        if !self.improvement_threshold.is_finite() || self.improvement_threshold < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "improvement_threshold",
                value: self.improvement_threshold,
            });
        }
        Ok(())
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<TrainConfig, ConfigError> {
        let config: TrainConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<TrainConfig, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
