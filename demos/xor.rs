use xor_playground::{NeuralNetwork, xor_samples};

fn main() -> xor_playground::Result<()> {
    let mut network = NeuralNetwork::new(2, 3, 1)?;
    network.set_learning_rate(0.1);

    let samples = xor_samples();
    let epochs = 20000;

    for epoch in 0..epochs {
        for sample in &samples {
            network.train(&sample.inputs, &sample.targets)?;
        }
        if epoch % 2000 == 0 {
            let loss = xor_playground::train::mean_squared_error(&network, &samples)?;
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for sample in &samples {
        println!("Input: {:?} -> Output: {:.4}", sample.inputs, network.feedforward(&sample.inputs)?[0]);
    }

    Ok(())
}
