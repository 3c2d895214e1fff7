//! Shared utilities for neural network implementations
//!
//! This module provides the seedable random source and the activation functions used by
//! the network.

pub mod activations;
pub mod rng;

pub use activations::{Activation, UnknownActivation};
pub use rng::SimpleRng;
