use thiserror::Error;

use crate::scenario::types::Parameter;

/// Raised when an input lies outside the domain of the Cobb-Douglas model.
/// Surfaced immediately; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("{quantity} must be strictly positive, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },

    #[error("{quantity} must be finite, got {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("division by zero: {quantity} is zero")]
    ZeroDivisor { quantity: &'static str },

    #[error("invalid sample grid: {reason}")]
    InvalidGrid { reason: String },
}

/// Caller-side policy violations. The model itself is fine with these values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PolicyError {
    #[error("{parameter}={value} is outside [{min}, {max}]")]
    OutOfBounds {
        parameter: Parameter,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("alpha + beta must equal 1, got {sum}")]
    ExponentSum { sum: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("expected `name=value`, got {0:?}")]
    Malformed(String),

    #[error("unknown parameter {0:?}")]
    UnknownParameter(String),

    #[error("invalid number {value:?} for {parameter}")]
    InvalidNumber { parameter: Parameter, value: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl SessionError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::Domain(_) => "domain",
            SessionError::Policy(_) => "policy",
            SessionError::Command(_) => "command",
        }
    }
}
