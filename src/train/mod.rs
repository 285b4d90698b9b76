pub mod evaluate;
pub mod loss_point;
pub mod train_config;
pub mod loop_fn;

pub use evaluate::{mean_squared_error, predict_all, Prediction};
pub use loss_point::LossPoint;
pub use train_config::TrainConfig;
pub use loop_fn::{train_loop, TrainReport};
