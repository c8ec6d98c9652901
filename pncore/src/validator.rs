use regex::Regex;
use std::{
    fmt::{
        Debug,
        Formatter,
        Result as FmtResult,
    },
    sync::Arc,
};

use crate::{
    error::{
        ValidationError,
        ValidationErrors,
    },
    hexdecimal::Decimal,
};

pub trait Validator<T: ?Sized>: Debug + Send + Sync {
    fn validate(&self, value: &T) -> Result<(), ValidationError>;
}

/// An ordered, immutable set of validators for some `T`.
pub struct Validators<T: ?Sized>(Vec<Arc<dyn Validator<T>>>);

#[derive(Clone, Debug)]
pub struct RegexValidator {
    regex: Regex,
    message: String,
    code: String,
}

#[derive(Clone, Debug)]
pub struct MaxLengthValidator(pub usize);

#[derive(Clone, Debug)]
pub struct MinLengthValidator(pub usize);

/// Bounds the number of digits of a [`Decimal`].
#[derive(Clone, Debug)]
pub struct DecimalValidator {
    pub max_digits: Option<u32>,
    pub decimal_places: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct MaxValueValidator(pub Decimal);

#[derive(Clone, Debug)]
pub struct MinValueValidator(pub Decimal);

impl<T: ?Sized> Validators<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Validator<T>>> {
        self.0.iter()
    }

    /// Runs every validator, collecting all failures.
    pub fn run(&self, value: &T) -> Result<(), ValidationErrors> {
        let errors = self.0.iter()
            .filter_map(|v| v.validate(value).err())
            .collect::<Vec<_>>();
        ValidationErrors::from(errors).into_result()
    }
}

impl<T: ?Sized> Clone for Validators<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: ?Sized> Default for Validators<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Debug for Validators<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list()
            .entries(self.0.iter())
            .finish()
    }
}

impl<T: ?Sized> From<Vec<Arc<dyn Validator<T>>>> for Validators<T> {
    fn from(validators: Vec<Arc<dyn Validator<T>>>) -> Self {
        Self(validators)
    }
}

impl<T: ?Sized> Extend<Arc<dyn Validator<T>>> for Validators<T> {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Arc<dyn Validator<T>>>
    {
        self.0.extend(iter)
    }
}

impl RegexValidator {
    pub fn new(
        regex: Regex,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            regex,
            message: message.into(),
            code: code.into(),
        }
    }
}

impl Validator<str> for RegexValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if self.regex.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::new(self.message.as_str(), self.code.as_str()))
        }
    }
}

impl Validator<str> for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if len > self.0 {
            Err(ValidationError::new(
                format!("Ensure this value has at most {} characters (it has {len}).", self.0),
                "max_length",
            ))
        } else {
            Ok(())
        }
    }
}

impl Validator<str> for MinLengthValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        let len = value.chars().count();
        if len < self.0 {
            Err(ValidationError::new(
                format!("Ensure this value has at least {} characters (it has {len}).", self.0),
                "min_length",
            ))
        } else {
            Ok(())
        }
    }
}

impl Validator<Decimal> for DecimalValidator {
    fn validate(&self, value: &Decimal) -> Result<(), ValidationError> {
        // only whole numbers can be represented, so every digit is a
        // whole digit.
        let digits = value.digits();
        if let Some(max_digits) = self.max_digits {
            if digits > max_digits as usize {
                return Err(ValidationError::new(
                    format!("Ensure that there are no more than {max_digits} digits in total."),
                    "max_digits",
                ));
            }
            let max_whole = max_digits.saturating_sub(self.decimal_places.unwrap_or(0));
            if digits > max_whole as usize {
                return Err(ValidationError::new(
                    format!("Ensure that there are no more than {max_whole} digits before the decimal point."),
                    "max_whole_digits",
                ));
            }
        }
        Ok(())
    }
}

impl Validator<Decimal> for MaxValueValidator {
    fn validate(&self, value: &Decimal) -> Result<(), ValidationError> {
        if value > &self.0 {
            Err(ValidationError::new(
                format!("Ensure this value is less than or equal to {}.", self.0),
                "max_value",
            ))
        } else {
            Ok(())
        }
    }
}

impl Validator<Decimal> for MinValueValidator {
    fn validate(&self, value: &Decimal) -> Result<(), ValidationError> {
        if value < &self.0 {
            Err(ValidationError::new(
                format!("Ensure this value is greater than or equal to {}.", self.0),
                "min_value",
            ))
        } else {
            Ok(())
        }
    }
}
