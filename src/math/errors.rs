use thiserror::Error;

/// Errors raised by the math helpers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// The input lies outside the function's domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
