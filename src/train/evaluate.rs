use serde::{Serialize, Deserialize};

use crate::data::xor::Sample;
use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::NeuralNetwork;

/// An output counts as correct when every component is within this distance of its target.
pub const PREDICTION_TOLERANCE: f64 = 0.1;

/// Network output for one sample, as shown in a results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub inputs: Vec<f64>,
    pub expected: Vec<f64>,
    pub predicted: Vec<f64>,
    pub correct: bool,
}

/// Rejects a sample whose target width differs from the network's output width.
fn check_targets(network: &NeuralNetwork, sample: &Sample, op: &'static str) -> Result<()> {
    if sample.targets.len() != network.output_size() {
        return Err(Error::DimensionMismatch {
            op,
            left: (network.output_size(), 1),
            right: (sample.targets.len(), 1),
        });
    }
    Ok(())
}

/// Mean loss over a full dataset (eval mode, no mutation). Empty datasets give `0.0`.
pub fn mean_squared_error(network: &NeuralNetwork, samples: &[Sample]) -> Result<f64> {
    if samples.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for sample in samples {
        check_targets(network, sample, "mean_squared_error targets")?;
        let output = network.feedforward(&sample.inputs)?;
        total += MseLoss::loss(&output, &sample.targets);
    }
    Ok(total / samples.len() as f64)
}

/// Runs inference on every sample.
pub fn predict_all(network: &NeuralNetwork, samples: &[Sample]) -> Result<Vec<Prediction>> {
    samples
        .iter()
        .map(|sample| -> Result<Prediction> {
            check_targets(network, sample, "predict_all targets")?;
            let predicted = network.feedforward(&sample.inputs)?;
            let correct = predicted
                .iter()
                .zip(&sample.targets)
                .all(|(p, t)| (t - p).abs() < PREDICTION_TOLERANCE);
            Ok(Prediction {
                inputs: sample.inputs.clone(),
                expected: sample.targets.clone(),
                predicted,
                correct,
            })
        })
        .collect()
}
