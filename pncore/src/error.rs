use thiserror::Error;

mod hex;
mod validation;

pub use hex::{
    ParseDecimalError,
    ParseHexError,
};
pub use validation::{
    FieldError,
    ValidationError,
    ValidationErrors,
};

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    #[cfg(feature = "sqlx")]
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    /// A value failed conversion or validation on its way to or from
    /// storage.
    #[error(transparent)]
    Field(#[from] FieldError),
    /// Denotes custom application invariant; generally informative.
    #[error("application invariant violated: {0}")]
    AppInvariantViolation(String),
    #[error("unknown error")]
    Unknown,
}

impl From<ParseHexError> for BackendError {
    fn from(error: ParseHexError) -> Self {
        Self::Field(FieldError::Parse(error))
    }
}
