use thiserror::Error;

/// Errors raised while constructing math primitives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathError {
    #[error("Degenerate vector: length is zero or out of range")]
    ZeroVector,

    #[error("Invalid bounds: max is smaller than min on the {axis} axis")]
    InvalidBounds { axis: char },
}
