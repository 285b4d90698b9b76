pub mod xor;

pub use xor::{xor_samples, Sample};
