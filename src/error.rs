use thiserror::Error;

/// Errors raised by the planner and its building blocks.
///
/// All of these are precondition violations detected at the offending call.
/// They are propagated to the caller, never retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RrtError {
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("node index {index} out of range for tree of {len} nodes")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("nearest neighbor query on an empty tree")]
    EmptyTree,
    #[error("cannot steer between coincident configurations")]
    DegenerateStep,
    #[error("step size too small to advance at this coordinate scale")]
    StalledStep,
    #[error("invalid bounds for dimension {dimension}")]
    InvalidBounds { dimension: usize },
    #[error("step size must be finite and positive")]
    InvalidStepSize,
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RrtError>;
