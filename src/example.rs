//! Labeled training examples.

use crate::error::NetworkError;
use serde::{Deserialize, Serialize};

/// Immutable `(input, output)` pair.
///
/// Vectors are expected to be normalized already; the network checks only their lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    input: Vec<f64>,
    output: Vec<f64>,
}

impl Example {
    pub fn new(input: Vec<f64>, output: Vec<f64>) -> Self {
        Self { input, output }
    }

    /// Example whose target is a one-hot vector of `width` entries with `label` set to 1.
    ///
    /// Fails with [`NetworkError::LabelOutOfRange`] if `label` is not in `0..width`.
    ///
    /// ```
    /// use online_mlp::Example;
    ///
    /// let example = Example::one_hot(vec![0.2, 0.8], 2, 4)?;
    /// assert_eq!(example.output(), &[0.0, 0.0, 1.0, 0.0]);
    /// # Ok::<(), online_mlp::NetworkError>(())
    /// ```
    pub fn one_hot(input: Vec<f64>, label: usize, width: usize) -> Result<Self, NetworkError> {
        if label >= width {
            return Err(NetworkError::LabelOutOfRange { label, width });
        }
        let output = (0..width)
            .map(|i| if i == label { 1.0 } else { 0.0 })
            .collect();
        Ok(Self { input, output })
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }
}

impl From<(Vec<f64>, Vec<f64>)> for Example {
    fn from((input, output): (Vec<f64>, Vec<f64>)) -> Self {
        Self::new(input, output)
    }
}
