use thiserror::Error;

/// Errors raised while assembling materials and lights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("{name} radius must be zero or larger, got {value}")]
    NegativeRadius { name: &'static str, value: f64 },

    #[error("{name} coefficient must be within [0, 1], got {value}")]
    InvalidCoefficient { name: &'static str, value: f64 },

    #[error("Attenuation factors must be non-negative with a positive sum, got ({kc}, {kl}, {kq})")]
    InvalidAttenuation { kc: f64, kl: f64, kq: f64 },
}
