use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::train::loss_point::LossPoint;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `hidden_size`     : hidden-layer width used when a playground builds its network
/// - `learning_rate`   : applied to the network at the start of the run
/// - `iterations`      : number of single-example training steps
/// - `steps_per_chunk` : steps between stop-flag checks
/// - `report_every`    : steps between loss samples; `0` disables sampling
/// - `seed`            : fixes weight initialization and sample order when set
/// - `progress_tx`     : optional channel sender; one `LossPoint` is sent per
///                       sample.  If the receiver is dropped the loop
///                       terminates early.
/// - `stop_flag`       : optional atomic flag; when set to `true` from another
///                       thread the loop terminates before the next chunk.
///
/// The two runtime hooks are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub hidden_size: usize,
    pub learning_rate: f64,
    pub iterations: usize,
    pub steps_per_chunk: usize,
    pub report_every: usize,
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<LossPoint>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            hidden_size: 3,
            learning_rate: 0.05,
            iterations: 50_000,
            steps_per_chunk: 1_000,
            report_every: 200,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }
}

impl TrainConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config from a JSON file; missing fields take their defaults.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
