/// One supervised example.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub inputs: Vec<f64>,
    pub targets: Vec<f64>,
}

impl Sample {
    pub fn new(inputs: &[f64], targets: &[f64]) -> Sample {
        Sample {
            inputs: inputs.to_vec(),
            targets: targets.to_vec(),
        }
    }
}

/// The four-row XOR truth table: `(0,0)->0, (0,1)->1, (1,0)->1, (1,1)->0`.
pub fn xor_samples() -> Vec<Sample> {
    vec![
        Sample::new(&[0.0, 0.0], &[0.0]),
        Sample::new(&[0.0, 1.0], &[1.0]),
        Sample::new(&[1.0, 0.0], &[1.0]),
        Sample::new(&[1.0, 1.0], &[0.0]),
    ]
}
