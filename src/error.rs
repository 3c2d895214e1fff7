//! Error types for network construction and propagation.

use std::fmt;

/// Which vector of a call failed the width check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    Input,
    Output,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKind::Input => f.write_str("input"),
            VectorKind::Output => f.write_str("output"),
        }
    }
}

/// Errors raised by [`Network`](crate::network::Network) operations.
///
/// Every kind is a configuration or programmer error. They are returned before any state
/// is touched, so the network is unchanged when one comes back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// The layer layout (or a supplied parameter set) cannot describe a network.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A supplied vector does not match the width of the layer it feeds.
    #[error("{vector} vector has length {actual}, but the {vector} layer has {expected} neurons")]
    DimensionMismatch {
        vector: VectorKind,
        expected: usize,
        actual: usize,
    },

    /// A class label does not index into the one-hot target it should mark.
    #[error("label {label} is out of range for {width} classes")]
    LabelOutOfRange { label: usize, width: usize },
}

impl NetworkError {
    pub(crate) fn check_width(
        vector: VectorKind,
        expected: usize,
        actual: usize,
    ) -> Result<(), NetworkError> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetworkError::DimensionMismatch {
                vector,
                expected,
                actual,
            })
        }
    }
}
