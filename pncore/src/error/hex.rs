use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure to read a string as a base-16 integer.
#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum ParseHexError {
    #[error("cannot parse hexadecimal number from empty string")]
    Empty,
    #[error("hexadecimal prefix `0x` is not followed by any digits")]
    MissingDigits,
    #[error("invalid hexadecimal digit {digit:?} at position {position}")]
    InvalidDigit {
        digit: char,
        position: usize,
    },
}

/// Failure to read a stored value as a base-10 integer.
#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum ParseDecimalError {
    #[error("cannot parse decimal number from empty string")]
    Empty,
    #[error("invalid decimal digit {digit:?} at position {position}")]
    InvalidDigit {
        digit: char,
        position: usize,
    },
}
