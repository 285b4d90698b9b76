pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod data;
pub mod train;
pub mod playground;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::sigmoid::{sigmoid, dsigmoid};
pub use network::network::NeuralNetwork;
pub use loss::mse::MseLoss;
pub use data::xor::{xor_samples, Sample};
pub use train::{train_loop, TrainConfig, TrainReport, LossPoint, Prediction};
pub use playground::{Playground, Status};
pub use error::{Error, Result};
