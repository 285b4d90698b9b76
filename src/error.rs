/// Errors produced by the matrix engine, the network and config loading.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operand shapes violate the operation's dimension contract.
    #[error("dimension mismatch in {op}: left is {}x{}, right is {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A matrix or layer was requested with a zero dimension.
    #[error("dimensions must be positive, got {rows}x{cols}")]
    EmptyShape { rows: usize, cols: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
