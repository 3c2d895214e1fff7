//! Layer storage for the network
//!
//! Each transition between two adjacent layers is a [`DenseLayer`] holding its weights,
//! biases and momentum memory.

pub mod dense;

pub use dense::{DenseLayer, WEIGHT_INIT_RANGE};
