use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::activation::sigmoid::{dsigmoid, sigmoid};
use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Fully connected network with one sigmoid hidden layer and a sigmoid output
/// layer, trained one example at a time.
///
/// The shape is fixed at construction; to change the hidden width build a new
/// network. The weight and bias matrices are private so their dimensions always
/// agree with `input_size`, `hidden_size` and `output_size`.
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    input_size: usize,
    hidden_size: usize,
    output_size: usize,
    weights_ih: Matrix, // hidden x input
    weights_ho: Matrix, // output x hidden
    bias_h: Matrix,     // hidden x 1
    bias_o: Matrix,     // output x 1
    learning_rate: f64,
}

/// Activations retained from a forward pass for the backward pass.
struct Forward {
    inputs: Matrix,
    hidden: Matrix,
    output: Matrix,
}

impl NeuralNetwork {
    pub const DEFAULT_LEARNING_RATE: f64 = 0.1;

    /// Builds a network with Xavier-initialized weights drawn from the thread RNG.
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Result<NeuralNetwork> {
        NeuralNetwork::with_rng(input_size, hidden_size, output_size, &mut rand::thread_rng())
    }

    /// Same as [`NeuralNetwork::new`] but reproducible from `seed`.
    pub fn with_seed(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        seed: u64,
    ) -> Result<NeuralNetwork> {
        let mut rng = StdRng::seed_from_u64(seed);
        NeuralNetwork::with_rng(input_size, hidden_size, output_size, &mut rng)
    }

    /// Builds a network drawing its initial weights and biases from `rng`.
    ///
    /// Every layer size must be positive. Biases are column vectors, so their
    /// Xavier bound uses `rows + 1`.
    pub fn with_rng<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<NeuralNetwork> {
        let mut weights_ih = Matrix::zeros(hidden_size, input_size)?;
        let mut weights_ho = Matrix::zeros(output_size, hidden_size)?;
        let mut bias_h = Matrix::zeros(hidden_size, 1)?;
        let mut bias_o = Matrix::zeros(output_size, 1)?;

        weights_ih.randomize(rng);
        weights_ho.randomize(rng);
        bias_h.randomize(rng);
        bias_o.randomize(rng);

        Ok(NeuralNetwork {
            input_size,
            hidden_size,
            output_size,
            weights_ih,
            weights_ho,
            bias_h,
            bias_o,
            learning_rate: NeuralNetwork::DEFAULT_LEARNING_RATE,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Replaces the learning rate. Any value is accepted; non-positive or very
    /// large rates freeze or diverge training.
    pub fn set_learning_rate(&mut self, lr: f64) {
        self.learning_rate = lr;
    }

    /// Runs inference and returns `output_size` activations. Does not mutate.
    pub fn feedforward(&self, inputs: &[f64]) -> Result<Vec<f64>> {
        Ok(self.forward(inputs)?.output.to_array())
    }

    /// One step of online backpropagation on a single example.
    ///
    /// All deltas are computed before any parameter is touched, so the hidden
    /// error is propagated through the pre-update output weights and a shape
    /// error leaves the network unchanged.
    pub fn train(&mut self, inputs: &[f64], targets: &[f64]) -> Result<()> {
        let Forward { inputs, hidden, output } = self.forward(inputs)?;
        let targets = column(targets, self.output_size, "train targets")?;

        let output_errors = targets.subtract(&output)?;
        let output_gradients = output
            .map(|y, _, _| dsigmoid(y))
            .hadamard(&output_errors)?
            .scale(self.learning_rate);
        let delta_weights_ho = output_gradients.dot(&hidden.transpose())?;

        let hidden_errors = self.weights_ho.transpose().dot(&output_errors)?;
        let hidden_gradients = hidden
            .map(|y, _, _| dsigmoid(y))
            .hadamard(&hidden_errors)?
            .scale(self.learning_rate);
        let delta_weights_ih = hidden_gradients.dot(&inputs.transpose())?;

        self.weights_ho.add(&delta_weights_ho)?;
        self.bias_o.add(&output_gradients)?;
        self.weights_ih.add(&delta_weights_ih)?;
        self.bias_h.add(&hidden_gradients)?;

        Ok(())
    }

    fn forward(&self, inputs: &[f64]) -> Result<Forward> {
        let inputs = column(inputs, self.input_size, "feedforward inputs")?;

        let mut hidden = self.weights_ih.dot(&inputs)?;
        hidden.add(&self.bias_h)?;
        let hidden = hidden.map(|x, _, _| sigmoid(x));

        let mut output = self.weights_ho.dot(&hidden)?;
        output.add(&self.bias_o)?;
        let output = output.map(|x, _, _| sigmoid(x));

        Ok(Forward { inputs, hidden, output })
    }
}

/// Column vector of exactly `expected` values.
fn column(values: &[f64], expected: usize, op: &'static str) -> Result<Matrix> {
    if values.len() != expected {
        return Err(Error::DimensionMismatch {
            op,
            left: (expected, 1),
            right: (values.len(), 1),
        });
    }
    Matrix::from_array(values)
}

impl fmt::Display for NeuralNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weight matrix for input and hidden layer")?;
        writeln!(f, "{}\n", self.weights_ih)?;
        writeln!(f, "Weight matrix for hidden and output layer")?;
        writeln!(f, "{}\n", self.weights_ho)?;
        writeln!(f, "Bias matrix for hidden layer")?;
        writeln!(f, "{}\n", self.bias_h)?;
        writeln!(f, "Bias matrix for output layer")?;
        write!(f, "{}", self.bias_o)
    }
}
