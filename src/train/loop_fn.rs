use std::sync::atomic::Ordering;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::xor::Sample;
use crate::error::Result;
use crate::network::network::NeuralNetwork;
use crate::train::evaluate::mean_squared_error;
use crate::train::loss_point::LossPoint;
use crate::train::train_config::TrainConfig;

/// Outcome of one `train_loop` run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainReport {
    /// Single-example steps actually performed.
    pub steps_completed: usize,
    /// Loss samples taken during this run, `step` counted from the run's start.
    pub history: Vec<LossPoint>,
    /// True when the run ended early via the stop flag or a dropped receiver.
    pub was_stopped: bool,
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` online for `config.iterations` steps.
///
/// Each step draws one sample uniformly at random with replacement and calls
/// [`NeuralNetwork::train`] on it. The network's learning rate is set to
/// `config.learning_rate` first.
///
/// Steps run in chunks of `config.steps_per_chunk`; the stop flag is checked
/// between chunks, so a caller can interrupt a long run from another thread.
/// Every `config.report_every` steps the mean squared error over `samples` is
/// recorded and, if configured, sent on `progress_tx`.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// An empty `samples` slice performs no steps.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut NeuralNetwork,
    samples: &[Sample],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainReport> {
    let mut report = TrainReport::default();
    if samples.is_empty() {
        return Ok(report);
    }

    network.set_learning_rate(config.learning_rate);
    let chunk = config.steps_per_chunk.max(1);

    'run: while report.steps_completed < config.iterations {
        if stop_requested(config) {
            report.was_stopped = true;
            break;
        }

        let chunk_end = (report.steps_completed + chunk).min(config.iterations);
        while report.steps_completed < chunk_end {
            let Some(sample) = samples.choose(rng) else {
                break 'run;
            };
            network.train(&sample.inputs, &sample.targets)?;
            report.steps_completed += 1;

            if config.report_every > 0 && report.steps_completed % config.report_every == 0 {
                let point = LossPoint {
                    step: report.steps_completed,
                    loss: mean_squared_error(network, samples)?,
                };
                report.history.push(point);

                if let Some(ref tx) = config.progress_tx {
                    // If the receiver has been dropped, stop training.
                    if tx.send(point).is_err() {
                        report.was_stopped = true;
                        break 'run;
                    }
                }
            }
        }
    }

    Ok(report)
}

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map_or(false, |flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::data::xor::xor_samples;
    use crate::error::Error;

    fn config(iterations: usize) -> TrainConfig {
        TrainConfig {
            iterations,
            steps_per_chunk: 100,
            report_every: 50,
            learning_rate: 0.5,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn runs_requested_steps_and_samples_loss() {
        let mut nn = NeuralNetwork::with_seed(2, 3, 1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let report = train_loop(&mut nn, &xor_samples(), &config(1_000), &mut rng).unwrap();

        assert_eq!(report.steps_completed, 1_000);
        assert!(!report.was_stopped);
        assert_eq!(report.history.len(), 20);
        assert_eq!(report.history[0].step, 50);
        assert_eq!(report.history.last().unwrap().step, 1_000);
        assert_eq!(nn.learning_rate(), 0.5);
    }

    #[test]
    fn zero_report_interval_records_nothing() {
        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 2).unwrap();
        let cfg = TrainConfig { report_every: 0, ..config(300) };
        let report = train_loop(&mut nn, &xor_samples(), &cfg, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(report.steps_completed, 300);
        assert!(report.history.is_empty());
    }

    #[test]
    fn same_seeds_reproduce_the_run() {
        let run = || {
            let mut nn = NeuralNetwork::with_seed(2, 3, 1, 9).unwrap();
            let report =
                train_loop(&mut nn, &xor_samples(), &config(500), &mut StdRng::seed_from_u64(9)).unwrap();
            (report.history, nn.feedforward(&[1.0, 0.0]).unwrap())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn preset_stop_flag_performs_no_steps() {
        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 3).unwrap();
        let before = nn.feedforward(&[1.0, 1.0]).unwrap();
        let cfg = TrainConfig {
            stop_flag: Some(Arc::new(AtomicBool::new(true))),
            ..config(1_000)
        };
        let report = train_loop(&mut nn, &xor_samples(), &cfg, &mut StdRng::seed_from_u64(3)).unwrap();

        assert!(report.was_stopped);
        assert_eq!(report.steps_completed, 0);
        assert_eq!(nn.feedforward(&[1.0, 1.0]).unwrap(), before);
    }

    #[test]
    fn stop_flag_set_mid_run_halts_at_chunk_boundary() {
        let (tx, rx) = mpsc::channel::<LossPoint>();
        let flag = Arc::new(AtomicBool::new(false));

        // Receiver raises the flag on the first sample, then keeps draining so
        // the channel never reports a dropped receiver.
        let watcher = {
            let flag = flag.clone();
            std::thread::spawn(move || {
                let mut seen = 0;
                for _ in rx {
                    flag.store(true, Ordering::Relaxed);
                    seen += 1;
                }
                seen
            })
        };

        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 8).unwrap();
        let cfg = TrainConfig {
            iterations: 2_000_000,
            steps_per_chunk: 250,
            report_every: 100,
            progress_tx: Some(tx),
            stop_flag: Some(flag),
            ..TrainConfig::default()
        };
        let report = train_loop(&mut nn, &xor_samples(), &cfg, &mut StdRng::seed_from_u64(8)).unwrap();
        drop(cfg);
        let seen = watcher.join().unwrap();

        assert!(report.was_stopped);
        assert!(report.steps_completed > 0);
        assert!(report.steps_completed < 2_000_000);
        assert_eq!(report.steps_completed % 250, 0);
        assert_eq!(seen, report.history.len());
    }

    #[test]
    fn progress_is_streamed_on_the_channel() {
        let (tx, rx) = mpsc::channel();
        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 4).unwrap();
        let cfg = TrainConfig { progress_tx: Some(tx), ..config(200) };
        let report = train_loop(&mut nn, &xor_samples(), &cfg, &mut StdRng::seed_from_u64(4)).unwrap();
        drop(cfg);

        let received: Vec<LossPoint> = rx.iter().collect();
        assert_eq!(received, report.history);
        assert_eq!(received.len(), 4);
    }

    #[test]
    fn dropped_receiver_stops_after_first_sample() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 5).unwrap();
        let cfg = TrainConfig { progress_tx: Some(tx), ..config(1_000) };
        let report = train_loop(&mut nn, &xor_samples(), &cfg, &mut StdRng::seed_from_u64(5)).unwrap();

        assert!(report.was_stopped);
        assert_eq!(report.steps_completed, 50);
    }

    #[test]
    fn empty_dataset_is_a_no_op() {
        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 6).unwrap();
        let report = train_loop(&mut nn, &[], &config(100), &mut StdRng::seed_from_u64(6)).unwrap();
        assert_eq!(report, TrainReport::default());
    }

    #[test]
    fn mismatched_sample_surfaces_dimension_error() {
        let mut nn = NeuralNetwork::with_seed(2, 2, 1, 7).unwrap();
        let bad = vec![Sample::new(&[1.0], &[1.0])];
        let res = train_loop(&mut nn, &bad, &config(10), &mut StdRng::seed_from_u64(7));
        assert!(matches!(res, Err(Error::DimensionMismatch { .. })));
    }
}
