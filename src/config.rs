//! Configuration structures for training
//!
//! A training run is described by a JSON file naming the topology, the hyperparameters,
//! the epoch count and an optional seed.

use crate::error::NetworkError;
use crate::network::{Hyperparameters, Network};
use crate::utils::{Activation, SimpleRng};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Errors raised while loading a training configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for a single training run.
///
/// `activation` defaults to sigmoid and `momentum_factor` to 0. Without a `seed` the
/// network is seeded from the clock.
///
/// # Example
///
/// ```json
/// {
///   "layer_sizes": [2, 4, 1],
///   "learning_rate": 0.5,
///   "momentum_factor": 0.4,
///   "activation": "sigmoid",
///   "epochs": 5000,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrainingConfig {
    /// Layer widths, input first, output last.
    pub layer_sizes: Vec<usize>,

    pub learning_rate: f64,

    #[serde(default)]
    pub momentum_factor: f64,

    #[serde(default)]
    pub activation: Activation,

    /// Number of full passes over the training set.
    pub epochs: usize,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl TrainingConfig {
    pub fn hyperparameters(&self) -> Hyperparameters {
        Hyperparameters::new(self.learning_rate, self.momentum_factor, self.activation)
    }

    /// Build a freshly initialized network for this configuration.
    pub fn build_network(&self) -> Result<Network, NetworkError> {
        let mut rng = match self.seed {
            Some(seed) => SimpleRng::new(seed),
            None => {
                info!("no seed configured, seeding weights from the clock");
                SimpleRng::from_time()
            }
        };
        Network::initialize(&self.layer_sizes, self.hyperparameters(), &mut rng)
    }

    /// Check value ranges that deserialization cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layer_sizes.len() < 2 {
            return Err(ConfigError::Invalid(
                "layer_sizes needs at least an input and an output layer".to_string(),
            ));
        }
        if self.layer_sizes.contains(&0) {
            return Err(ConfigError::Invalid(
                "layer_sizes entries must be positive".to_string(),
            ));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::Invalid(
                "learning_rate must be positive".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.momentum_factor) {
            return Err(ConfigError::Invalid(
                "momentum_factor must be in [0, 1)".to_string(),
            ));
        }
        if self.epochs == 0 {
            return Err(ConfigError::Invalid("epochs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Parse and validate a training configuration from a JSON string.
pub fn parse_config(contents: &str) -> Result<TrainingConfig, ConfigError> {
    let config: TrainingConfig = serde_json::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Loads a training configuration from a JSON file.
///
/// # Examples
///
/// ```no_run
/// use online_mlp::config::load_config;
///
/// let cfg = load_config("config/xor_sigmoid.json").unwrap();
/// assert_eq!(cfg.layer_sizes, vec![2, 4, 1]);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TrainingConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let config =
            parse_config(r#"{"layer_sizes": [2, 1], "learning_rate": 0.1, "epochs": 3}"#).unwrap();
        assert_eq!(config.activation, Activation::Sigmoid);
        assert_eq!(config.momentum_factor, 0.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_rejects_momentum_of_one() {
        let result = parse_config(
            r#"{"layer_sizes": [2, 1], "learning_rate": 0.1, "momentum_factor": 1.0, "epochs": 3}"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let config = parse_config(
            r#"{"layer_sizes": [3, 2, 2], "learning_rate": 0.3, "epochs": 1, "seed": 17}"#,
        )
        .unwrap();
        assert_eq!(config.build_network().unwrap(), config.build_network().unwrap());
    }
}
