use std::{
    borrow::Cow,
    sync::Arc,
};

use crate::{
    error::{
        FieldError,
        ParseHexError,
        ValidationError,
    },
    form::{
        HexaDecimalFormField,
        HexaDecimalFormFieldBuilder,
    },
    hexdecimal::{
        Decimal,
        decimal_to_hex,
        hex_to_decimal,
    },
    schema::{
        ColumnKind,
        ColumnSchema,
    },
    validator::{
        DecimalValidator,
        Validator,
        Validators,
    },
};

pub const DEFAULT_MAX_DIGITS: u32 = 100;

/// A value as handed to a [`HexDecimalField`] by application code or the
/// persistence layer; an absent value is represented by `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Hex(String),
    Decimal(Decimal),
}

/// A model field that stores a hexadecimal string as a decimal.
///
/// Application code always deals with the hexadecimal string; only the
/// storage layer sees the [`Decimal`].
#[derive(Clone, Debug)]
pub struct HexDecimalField {
    max_digits: u32,
    decimal_places: u32,
    null: bool,
    blank: bool,
    db_index: bool,
    verbose_name: Option<String>,
    help_text: Option<String>,
    validators: Validators<Decimal>,
}

#[derive(Clone, Debug)]
pub struct HexDecimalFieldBuilder {
    max_digits: u32,
    decimal_places: u32,
    null: bool,
    blank: bool,
    db_index: bool,
    verbose_name: Option<String>,
    help_text: Option<String>,
    validators: Validators<Decimal>,
}

impl FieldValue {
    /// Empty values are never converted nor validated.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Hex(s) if s.is_empty())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Hex(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Hex(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl HexDecimalField {
    pub fn builder() -> HexDecimalFieldBuilder {
        HexDecimalFieldBuilder::new()
    }

    pub fn max_digits(&self) -> u32 {
        self.max_digits
    }

    pub fn decimal_places(&self) -> u32 {
        self.decimal_places
    }

    pub fn null(&self) -> bool {
        self.null
    }

    pub fn blank(&self) -> bool {
        self.blank
    }

    pub fn db_index(&self) -> bool {
        self.db_index
    }

    pub fn verbose_name(&self) -> Option<&str> {
        self.verbose_name.as_deref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    /// The value to be stored; a hexadecimal string is converted into
    /// its decimal value, an empty string is stored as no value.
    pub fn get_prep_value(
        &self,
        value: Option<&FieldValue>,
    ) -> Result<Option<Decimal>, ParseHexError> {
        match value {
            None => Ok(None),
            Some(value) if value.is_empty() => Ok(None),
            Some(FieldValue::Hex(value)) => {
                let result = hex_to_decimal(value)?;
                log::debug!("prepared hex {value:?} for storage as {result}");
                Ok(Some(result))
            }
            Some(FieldValue::Decimal(value)) => Ok(Some(value.clone())),
        }
    }

    /// The application value for what was read from storage, which is
    /// always the lowercase hexadecimal string without prefix.
    pub fn from_db_value(&self, value: Option<Decimal>) -> Option<String> {
        value.as_ref().map(decimal_to_hex)
    }

    /// Coerce to the native type.
    ///
    /// Note that unlike [`Self::from_db_value`] this turns a hexadecimal
    /// string into its `Decimal`; values that are not strings pass
    /// through unchanged.
    pub fn to_python(
        &self,
        value: Option<FieldValue>,
    ) -> Result<Option<FieldValue>, ParseHexError> {
        match value {
            Some(FieldValue::Hex(value)) => Ok(Some(FieldValue::Decimal(hex_to_decimal(&value)?))),
            value => Ok(value),
        }
    }

    /// Null and blank checks.
    pub fn validate(&self, value: Option<&FieldValue>) -> Result<(), FieldError> {
        match value {
            None if !self.null => Err(ValidationError::new(
                "This field cannot be null.",
                "null",
            ).into()),
            Some(value) if value.is_empty() && !self.blank => Err(ValidationError::new(
                "This field cannot be blank.",
                "blank",
            ).into()),
            _ => Ok(()),
        }
    }

    /// Runs the numeric validators against the decimal value.
    ///
    /// This is expected to be called either with the raw hexadecimal
    /// string before [`Self::to_python`], or with the `Decimal` it
    /// produced; the former is converted first, the latter is used as
    /// is, so the outcome is independent of which side of the conversion
    /// the caller sits on.  Empty values are not validated.
    pub fn run_validators(&self, value: &FieldValue) -> Result<(), FieldError> {
        let value = match value {
            value if value.is_empty() => return Ok(()),
            FieldValue::Hex(value) => Cow::Owned(hex_to_decimal(value)?),
            FieldValue::Decimal(value) => Cow::Borrowed(value),
        };
        Ok(self.validators.run(&value)?)
    }

    /// Full clean of a model value: coerce, check for null/blank then
    /// run the validators.  Empty values are only checked for null/blank
    /// and returned as given.
    pub fn clean(
        &self,
        value: Option<FieldValue>,
    ) -> Result<Option<FieldValue>, FieldError> {
        if value.as_ref().map(FieldValue::is_empty).unwrap_or(true) {
            self.validate(value.as_ref())?;
            return Ok(value);
        }
        let value = self.to_python(value)?;
        self.validate(value.as_ref())?;
        if let Some(value) = value.as_ref() {
            self.run_validators(value)?;
        }
        Ok(value)
    }

    /// The builder for the form field that edits this column, for callers
    /// wishing to adjust it further.
    pub fn formfield_builder(&self) -> HexaDecimalFormFieldBuilder {
        HexaDecimalFormField::builder()
            .required(!self.blank)
            .label(self.verbose_name.clone())
            .help_text(self.help_text.clone())
    }

    /// The form field for editing this column, which works with the
    /// hexadecimal string rather than a raw number.
    pub fn formfield(&self) -> HexaDecimalFormField {
        self.formfield_builder().build()
    }

    pub fn column(&self, name: impl Into<String>) -> ColumnSchema {
        ColumnSchema {
            name: name.into(),
            kind: ColumnKind::Decimal {
                max_digits: self.max_digits,
                decimal_places: self.decimal_places,
            },
            null: self.null,
            blank: self.blank,
            db_index: self.db_index,
            verbose_name: self.verbose_name.clone(),
            help_text: self.help_text.clone(),
        }
    }
}

impl Default for HexDecimalFieldBuilder {
    fn default() -> Self {
        Self {
            max_digits: DEFAULT_MAX_DIGITS,
            decimal_places: 0,
            null: false,
            blank: false,
            db_index: false,
            verbose_name: None,
            help_text: None,
            validators: Validators::new(),
        }
    }
}

impl HexDecimalFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_digits(mut self, max_digits: u32) -> Self {
        self.max_digits = max_digits;
        self
    }

    pub fn decimal_places(mut self, decimal_places: u32) -> Self {
        self.decimal_places = decimal_places;
        self
    }

    pub fn null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    pub fn blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    pub fn db_index(mut self, db_index: bool) -> Self {
        self.db_index = db_index;
        self
    }

    pub fn verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    pub fn validator(mut self, validator: impl Validator<Decimal> + 'static) -> Self {
        self.validators.extend([Arc::new(validator) as Arc<dyn Validator<Decimal>>]);
        self
    }

    pub fn build(self) -> HexDecimalField {
        let mut validators = Validators::from(vec![
            Arc::new(DecimalValidator {
                max_digits: Some(self.max_digits),
                decimal_places: Some(self.decimal_places),
            }) as Arc<dyn Validator<Decimal>>,
        ]);
        validators.extend(self.validators.iter().cloned());
        HexDecimalField {
            max_digits: self.max_digits,
            decimal_places: self.decimal_places,
            null: self.null,
            blank: self.blank,
            db_index: self.db_index,
            verbose_name: self.verbose_name,
            help_text: self.help_text,
            validators,
        }
    }
}
