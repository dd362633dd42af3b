use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures of the pure pricing, cart and catalog rules.
///
/// Nothing here knows about HTTP; the client wraps these as `InvalidInput`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A form-level rule failed: blank client name, empty cart, overpayment.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A number was negative, NaN or infinite.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No record or cart position with that key.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
