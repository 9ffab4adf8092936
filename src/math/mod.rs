//! Integer math helpers.

/// Errors raised by the math helpers
pub mod errors;
/// Floor square root by Newton's iteration
pub mod sqrt;

pub use errors::MathError;
pub use sqrt::{isqrt, isqrt_u256};
