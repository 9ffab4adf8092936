/// Canonical pair ordering and pair state
pub mod pair;
/// Token deployment parameters
pub mod token;
