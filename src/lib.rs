//! Online multilayer perceptron
//!
//! A fully connected feedforward network of arbitrary depth, trained one example at a time
//! by backpropagation with momentum.
//!
//! # Modules
//!
//! - `network`: the network model with forward and backward passes
//! - `training`: the epoch loop and the evaluator
//! - `layers`: per-transition parameter storage
//! - `example`: labeled training examples
//! - `utils`: seedable RNG and activation functions
//! - `config`: JSON training configuration
//! - `error`: error types
//!
//! # Example
//!
//! ```
//! use online_mlp::network::{Hyperparameters, Network};
//! use online_mlp::utils::Activation;
//! use online_mlp::Example;
//!
//! let hp = Hyperparameters::new(0.5, 0.4, Activation::Sigmoid);
//! let mut network = Network::seeded(&[2, 3, 1], hp, 42)?;
//! let examples = vec![
//!     Example::new(vec![0.0, 0.0], vec![0.0]),
//!     Example::new(vec![1.0, 1.0], vec![1.0]),
//! ];
//!
//! let series = network.train(&examples, 50)?;
//! assert_eq!(series.len(), 50);
//! let score = network.evaluate(&examples)?;
//! assert!(score <= 100.0);
//! # Ok::<(), online_mlp::NetworkError>(())
//! ```

pub mod config;
pub mod error;
pub mod example;
pub mod layers;
pub mod network;
pub mod training;
pub mod utils;

pub use error::{NetworkError, VectorKind};
pub use example::Example;
pub use network::{Hyperparameters, Network};
pub use training::EpochSummary;
pub use utils::Activation;
