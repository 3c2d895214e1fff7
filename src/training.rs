//! Online training loop and evaluator
//!
//! Training walks the example set once per epoch, in order, updating the network after
//! every single example. Both training and evaluation report the same metric:
//! `(1 - mean_error) * 100`, where `mean_error` is the average of the per-example
//! `0.5 * sum (target - output)^2`.

use crate::error::NetworkError;
use crate::example::Example;
use crate::network::{squared_error, Network};
use log::debug;
use std::ops::ControlFlow;

/// What one finished epoch looked like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochSummary {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Sum of the per-example errors returned by `backward` during the epoch.
    pub total_error: f64,
    /// `(1 - total_error / example_count) * 100`.
    pub accuracy: f64,
}

/// Convert a summed error over `count` examples into the percentage metric.
///
/// An empty set has no error and scores 100.
pub fn accuracy_from_error(total_error: f64, count: usize) -> f64 {
    (1.0 - mean_error(total_error, count)) * 100.0
}

fn mean_error(total_error: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total_error / count as f64
    }
}

impl Network {
    /// Train for `epochs` full passes over `examples` and return the per-epoch accuracy.
    ///
    /// Every example is checked against the network's widths before the first update, so
    /// a malformed set fails with [`NetworkError::DimensionMismatch`] and trains nothing.
    pub fn train(&mut self, examples: &[Example], epochs: usize) -> Result<Vec<f64>, NetworkError> {
        self.train_with(examples, epochs, |_| ControlFlow::Continue(()))
    }

    /// Like [`Network::train`], calling `on_epoch` after each epoch.
    ///
    /// Returning `ControlFlow::Break(())` stops training at that epoch boundary; the series
    /// recorded so far, including the epoch that just finished, is returned.
    ///
    /// ```
    /// use online_mlp::network::{Hyperparameters, Network};
    /// use online_mlp::utils::Activation;
    /// use online_mlp::Example;
    /// use std::ops::ControlFlow;
    ///
    /// let hp = Hyperparameters::new(0.5, 0.4, Activation::Sigmoid);
    /// let mut network = Network::seeded(&[2, 2, 1], hp, 1).unwrap();
    /// let examples = vec![Example::new(vec![1.0, 0.0], vec![1.0])];
    ///
    /// let series = network
    ///     .train_with(&examples, 100, |summary| {
    ///         if summary.epoch == 3 {
    ///             ControlFlow::Break(())
    ///         } else {
    ///             ControlFlow::Continue(())
    ///         }
    ///     })
    ///     .unwrap();
    /// assert_eq!(series.len(), 3);
    /// ```
    pub fn train_with<F>(
        &mut self,
        examples: &[Example],
        epochs: usize,
        mut on_epoch: F,
    ) -> Result<Vec<f64>, NetworkError>
    where
        F: FnMut(&EpochSummary) -> ControlFlow<()>,
    {
        examples
            .iter()
            .try_for_each(|example| self.check_example(example))?;

        let mut series = Vec::with_capacity(epochs);
        for epoch in 1..=epochs {
            let mut total_error = 0.0;
            for example in examples {
                total_error += self.backward(example)?;
            }

            let summary = EpochSummary {
                epoch,
                total_error,
                accuracy: accuracy_from_error(total_error, examples.len()),
            };
            debug!(
                "epoch {}/{}: error {:.6}, accuracy {:.4}%",
                epoch, epochs, summary.total_error, summary.accuracy
            );
            series.push(summary.accuracy);

            if on_epoch(&summary).is_break() {
                debug!("training stopped after epoch {}", epoch);
                break;
            }
        }
        Ok(series)
    }

    /// Mean per-example squared error over `examples`, computed without mutating the
    /// network.
    pub fn mean_squared_error(&self, examples: &[Example]) -> Result<f64, NetworkError> {
        let mut total_error = 0.0;
        for example in examples {
            self.check_example(example)?;
            let output = self.predict(example.input())?;
            total_error += squared_error(example.output(), &output)?;
        }
        Ok(mean_error(total_error, examples.len()))
    }

    /// Score `examples` with the same percentage metric `train` reports.
    pub fn evaluate(&self, examples: &[Example]) -> Result<f64, NetworkError> {
        let mean = self.mean_squared_error(examples)?;
        Ok((1.0 - mean) * 100.0)
    }
}
