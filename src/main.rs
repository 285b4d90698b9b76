// Console driver: trains the XOR network and prints the loss curve as it goes.
//
// Run with:
//   cargo run --release -- [config.json]
//
// The optional JSON file may set any of: hidden_size, learning_rate,
// iterations, steps_per_chunk, report_every, seed.
use std::process::ExitCode;
use std::sync::mpsc;
use std::thread;

use xor_playground::{Playground, Result, TrainConfig};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => TrainConfig::load_json(&path)?,
        None => TrainConfig::default(),
    };

    let mut playground = Playground::from_config(&config)?;

    println!("xor-playground: 2-{}-1 sigmoid network learning XOR", playground.hidden_size());
    println!(
        "learning rate {}, {} steps, loss sampled every {} steps",
        config.learning_rate, config.iterations, config.report_every
    );
    println!("initial loss: {:.6}", playground.loss()?);

    // Training runs on its own thread and streams loss samples back here.
    let (tx, rx) = mpsc::channel();
    config.progress_tx = Some(tx);

    let worker = thread::spawn(move || {
        let report = playground.train(&config);
        (playground, report)
    });

    for point in rx {
        println!("step {:>7}  loss {:.6}", point.step, point.loss);
    }

    let (playground, report) = match worker.join() {
        Ok(done) => done,
        Err(_) => {
            eprintln!("error: training thread panicked");
            return Ok(ExitCode::FAILURE);
        }
    };
    let report = report?;

    println!("trained {} steps{}", report.steps_completed, if report.was_stopped { " (stopped)" } else { "" });
    println!("final loss: {:.6}  status: {:?}", playground.loss()?, playground.status());
    println!("----------------------------------------");
    println!("Predictions:");
    for p in playground.predictions()? {
        println!(
            "XOR({}, {})  expected {}  got {:.3}  {}",
            p.inputs[0],
            p.inputs[1],
            p.expected[0],
            p.predicted[0],
            if p.correct { "ok" } else { "miss" }
        );
    }
    println!("----------------------------------------");
    println!("{}", playground.network());

    Ok(ExitCode::SUCCESS)
}
