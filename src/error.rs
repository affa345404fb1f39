use thiserror::Error;

#[derive(Error, Debug)]
pub enum FittingError {
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, FittingError>;
