use log::info;
use online_mlp::config::load_config;
use online_mlp::{Example, Network};
use std::env;
use std::error::Error;
use std::ops::ControlFlow;
use std::time::Instant;

// Small MLP learning XOR with online backprop and momentum.
const DEFAULT_CONFIG: &str = "config/xor_sigmoid.json";
// Progress is logged every this many epochs.
const LOG_EVERY: usize = 500;

// XOR truth table as training examples.
fn xor_examples() -> Vec<Example> {
    [
        ([0.0, 0.0], 0.0),
        ([0.0, 1.0], 1.0),
        ([1.0, 0.0], 1.0),
        ([1.0, 1.0], 0.0),
    ]
    .into_iter()
    .map(|(input, target)| Example::new(input.to_vec(), vec![target]))
    .collect()
}

// Print the prediction for every XOR sample.
fn report(network: &Network, examples: &[Example]) -> Result<(), Box<dyn Error>> {
    println!("\nTesting the trained network:");
    for example in examples {
        let output = network.predict(example.input())?;
        println!(
            "Input: {:.1}, {:.1}, Expected Output: {:.1}, Predicted Output: {:.3}",
            example.input()[0],
            example.input()[1],
            example.output()[0],
            output[0]
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = load_config(&path)?;
    info!(
        "training {:?} ({}) for {} epochs, lr {}, momentum {}",
        config.layer_sizes,
        config.activation,
        config.epochs,
        config.learning_rate,
        config.momentum_factor
    );

    // The XOR samples fix the input and output widths.
    if config.layer_sizes.first() != Some(&2) || config.layer_sizes.last() != Some(&1) {
        return Err(format!("{} must describe a 2-input, 1-output network", path).into());
    }

    let examples = xor_examples();
    let mut network = config.build_network()?;

    let train_start = Instant::now();
    let series = network.train_with(&examples, config.epochs, |summary| {
        if summary.epoch % LOG_EVERY == 0 {
            info!(
                "Epoch {}, Error: {:.6}, Accuracy: {:.4}%",
                summary.epoch, summary.total_error, summary.accuracy
            );
        }
        ControlFlow::Continue(())
    })?;
    info!(
        "Training time: {:.2} seconds",
        train_start.elapsed().as_secs_f64()
    );

    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        info!("Accuracy went from {:.4}% to {:.4}%", first, last);
    }
    println!("Final score: {:.4}%", network.evaluate(&examples)?);
    report(&network, &examples)
}
