use serde::{Deserialize, Serialize};
use std::{
    fmt::{
        Display,
        Formatter,
        Result as FmtResult,
    },
    ops::Deref,
};
use thiserror::Error;

use super::ParseHexError;

/// A single user facing validation failure, identified by a stable code
/// so callers may substitute their own (e.g. translated) message.
#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub code: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Error, Deserialize, Serialize)]
pub struct ValidationErrors(pub(crate) Vec<ValidationError>);

/// Errors produced by the hex backed model field.
///
/// `Parse` is the low level failure raised when malformed input reaches
/// the storage conversion directly; `Validation` carries the user facing
/// failures from the validators.
#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum FieldError {
    #[error(transparent)]
    Parse(#[from] ParseHexError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ValidationError {
    pub fn new(
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn codes(&self) -> Vec<&str> {
        self.0.iter()
            .map(|e| e.code.as_str())
            .collect()
    }

    /// Converts into a `Result`, being `Ok` only when nothing was
    /// collected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let messages = self.0.iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>();
        f.write_str(&messages.join(" "))
    }
}

impl Deref for ValidationErrors {
    type Target = [ValidationError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl From<Vec<ValidationError>> for ValidationErrors {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }
}

impl From<ValidationError> for FieldError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.into())
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
