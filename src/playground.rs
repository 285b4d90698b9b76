use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::xor::{xor_samples, Sample};
use crate::error::Result;
use crate::network::network::NeuralNetwork;
use crate::train::evaluate::{mean_squared_error, predict_all, Prediction};
use crate::train::loop_fn::{train_loop, TrainReport};
use crate::train::loss_point::LossPoint;
use crate::train::train_config::TrainConfig;

pub const INPUT_SIZE: usize = 2;
pub const OUTPUT_SIZE: usize = 1;
pub const MIN_HIDDEN: usize = 1;
pub const MAX_HIDDEN: usize = 8;

/// Where a session stands, as shown next to the loss curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Fresh network, nothing trained since the last reset or resize.
    Ready,
    /// At least one training step has run on the current network.
    Trained,
}

/// Session state for an interactive XOR run.
///
/// Owns the current network and the loss curve accumulated across training
/// runs. Resizing the hidden layer or resetting throws the network away and
/// builds a fresh one; the old weights are never reused.
pub struct Playground {
    network: NeuralNetwork,
    hidden_size: usize,
    samples: Vec<Sample>,
    history: Vec<LossPoint>,
    steps_trained: usize,
    rng: StdRng,
}

impl Playground {
    /// New session on the XOR table. `hidden_size` is clamped to
    /// `MIN_HIDDEN..=MAX_HIDDEN`; `seed` fixes initialization and sampling.
    pub fn new(hidden_size: usize, seed: Option<u64>) -> Result<Playground> {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let hidden_size = clamp_hidden(hidden_size);
        let network = NeuralNetwork::with_rng(INPUT_SIZE, hidden_size, OUTPUT_SIZE, &mut rng)?;

        Ok(Playground {
            network,
            hidden_size,
            samples: xor_samples(),
            history: Vec::new(),
            steps_trained: 0,
            rng,
        })
    }

    pub fn from_config(config: &TrainConfig) -> Result<Playground> {
        Playground::new(config.hidden_size, config.seed)
    }

    pub fn network(&self) -> &NeuralNetwork {
        &self.network
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Loss curve across all runs since the last reset, `step` counted cumulatively.
    pub fn history(&self) -> &[LossPoint] {
        &self.history
    }

    pub fn steps_trained(&self) -> usize {
        self.steps_trained
    }

    pub fn status(&self) -> Status {
        if self.steps_trained > 0 {
            Status::Trained
        } else {
            Status::Ready
        }
    }

    /// Discards the network and loss curve and starts over at the current width.
    pub fn reset(&mut self) -> Result<()> {
        self.network = NeuralNetwork::with_rng(INPUT_SIZE, self.hidden_size, OUTPUT_SIZE, &mut self.rng)?;
        self.history.clear();
        self.steps_trained = 0;
        Ok(())
    }

    /// Rebuilds the network with a new hidden width (clamped) and returns the width used.
    pub fn set_hidden_size(&mut self, hidden_size: usize) -> Result<usize> {
        self.hidden_size = clamp_hidden(hidden_size);
        self.reset()?;
        Ok(self.hidden_size)
    }

    pub fn grow_hidden(&mut self) -> Result<usize> {
        self.set_hidden_size(self.hidden_size + 1)
    }

    pub fn shrink_hidden(&mut self) -> Result<usize> {
        self.set_hidden_size(self.hidden_size.saturating_sub(1))
    }

    /// Runs `train_loop` on the current network and appends its loss samples
    /// to the session curve.
    pub fn train(&mut self, config: &TrainConfig) -> Result<TrainReport> {
        let report = train_loop(&mut self.network, &self.samples, config, &mut self.rng)?;

        let offset = self.steps_trained;
        self.history.extend(report.history.iter().map(|p| LossPoint {
            step: p.step + offset,
            loss: p.loss,
        }));
        self.steps_trained += report.steps_completed;

        Ok(report)
    }

    /// Mean squared error of the current network over the dataset.
    pub fn loss(&self) -> Result<f64> {
        mean_squared_error(&self.network, &self.samples)
    }

    pub fn predictions(&self) -> Result<Vec<Prediction>> {
        predict_all(&self.network, &self.samples)
    }
}

fn clamp_hidden(hidden_size: usize) -> usize {
    hidden_size.clamp(MIN_HIDDEN, MAX_HIDDEN)
}
