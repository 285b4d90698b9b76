use serde::{Serialize, Deserialize};

/// One sample of the loss curve emitted by `train_loop`.
///
/// When a `progress_tx` channel is configured in `TrainConfig`, the loop sends
/// one `LossPoint` every `report_every` steps so a display can plot the curve
/// while training runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossPoint {
    /// Training steps completed when the loss was measured.
    pub step: usize,
    /// Mean squared error over the whole dataset at that step.
    pub loss: f64,
}
