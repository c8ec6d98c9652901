use regex::Regex;
use std::sync::{
    Arc,
    LazyLock,
};

use crate::{
    error::{
        ValidationError,
        ValidationErrors,
    },
    field::FieldValue,
    hexdecimal::decimal_to_hex,
    validator::{
        MaxLengthValidator,
        MinLengthValidator,
        RegexValidator,
        Validator,
        Validators,
    },
};

pub const HEX_PATTERN: &str = r"(?i)^(([0-9a-f])|(0x[0-9a-f]))+$";
pub const INVALID_HEX_MESSAGE: &str = "Enter a valid hexadecimal number";
pub const REQUIRED_MESSAGE: &str = "This field is required.";

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(HEX_PATTERN).expect("HEX_PATTERN is a valid regex")
});

/// A text form field that only accepts hexadecimal numbers, and presents
/// stored decimal values back as hexadecimal for editing.
#[derive(Clone, Debug)]
pub struct HexaDecimalFormField {
    required: bool,
    strip: bool,
    label: Option<String>,
    help_text: Option<String>,
    required_message: String,
    validators: Validators<str>,
}

#[derive(Clone, Debug)]
pub struct HexaDecimalFormFieldBuilder {
    required: bool,
    strip: bool,
    label: Option<String>,
    help_text: Option<String>,
    max_length: Option<usize>,
    min_length: Option<usize>,
    invalid_message: String,
    required_message: String,
    validators: Validators<str>,
}

/// The validators every hex form field starts with; `message` is what
/// gets reported for malformed input, allowing a translated message to
/// be supplied.
pub fn default_validators(message: &str) -> Validators<str> {
    Validators::from(vec![
        Arc::new(RegexValidator::new(HEX_RE.clone(), message, "invalid"))
            as Arc<dyn Validator<str>>,
    ])
}

impl HexaDecimalFormField {
    pub fn builder() -> HexaDecimalFormFieldBuilder {
        HexaDecimalFormFieldBuilder::new()
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    pub fn validators(&self) -> &Validators<str> {
        &self.validators
    }

    /// Renders a value for display; a stored decimal becomes its
    /// hexadecimal string, strings are shown as given.
    pub fn prepare_value(&self, value: Option<&FieldValue>) -> Option<String> {
        match value? {
            FieldValue::Decimal(value) => Some(decimal_to_hex(value)),
            FieldValue::Hex(value) => Some(value.clone()),
        }
    }

    pub fn to_python(&self, value: Option<&str>) -> String {
        match value {
            Some(value) if self.strip => value.trim().to_string(),
            Some(value) => value.to_string(),
            None => String::new(),
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if self.required && value.is_empty() {
            Err(ValidationError::new(self.required_message.as_str(), "required"))
        } else {
            Ok(())
        }
    }

    pub fn run_validators(&self, value: &str) -> Result<(), ValidationErrors> {
        if value.is_empty() {
            return Ok(());
        }
        self.validators.run(value)
    }

    /// Normalizes the raw input and validates it, returning the cleaned
    /// hexadecimal string (empty for an omitted optional value).
    pub fn clean(&self, value: Option<&str>) -> Result<String, ValidationErrors> {
        let value = self.to_python(value);
        self.validate(&value)?;
        self.run_validators(&value)?;
        Ok(value)
    }
}

impl Default for HexaDecimalFormFieldBuilder {
    fn default() -> Self {
        Self {
            required: true,
            strip: true,
            label: None,
            help_text: None,
            max_length: None,
            min_length: None,
            invalid_message: INVALID_HEX_MESSAGE.to_string(),
            required_message: REQUIRED_MESSAGE.to_string(),
            validators: Validators::new(),
        }
    }
}

impl HexaDecimalFormFieldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn label(mut self, label: Option<String>) -> Self {
        self.label = label;
        self
    }

    pub fn help_text(mut self, help_text: Option<String>) -> Self {
        self.help_text = help_text;
        self
    }

    pub fn max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn min_length(mut self, min_length: Option<usize>) -> Self {
        self.min_length = min_length;
        self
    }

    pub fn invalid_message(mut self, message: impl Into<String>) -> Self {
        self.invalid_message = message.into();
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    pub fn validator(mut self, validator: impl Validator<str> + 'static) -> Self {
        self.validators.extend([Arc::new(validator) as Arc<dyn Validator<str>>]);
        self
    }

    pub fn build(self) -> HexaDecimalFormField {
        let mut validators = default_validators(&self.invalid_message);
        if let Some(max_length) = self.max_length {
            validators.extend([Arc::new(MaxLengthValidator(max_length)) as Arc<dyn Validator<str>>]);
        }
        if let Some(min_length) = self.min_length {
            validators.extend([Arc::new(MinLengthValidator(min_length)) as Arc<dyn Validator<str>>]);
        }
        validators.extend(self.validators.iter().cloned());
        HexaDecimalFormField {
            required: self.required,
            strip: self.strip,
            label: self.label,
            help_text: self.help_text,
            required_message: self.required_message,
            validators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexdecimal::Decimal;

    #[test]
    fn accepts_hex() {
        let field = HexaDecimalFormField::builder().build();
        for value in ["0", "1a2b3c", "0xFF", "0XfF", "DEADbeef", "0x10x2", "abc"] {
            assert_eq!(field.clean(Some(value)).as_deref(), Ok(value), "{value}");
        }
    }

    #[test]
    fn rejects_malformed() {
        let field = HexaDecimalFormField::builder().build();
        let invalid = ValidationErrors::from(
            ValidationError::new(INVALID_HEX_MESSAGE, "invalid")
        );
        for value in ["12g4", "0x", "ab 12", "0x0x", "-1", "f_f", "x1"] {
            assert_eq!(field.clean(Some(value)), Err(invalid.clone()), "{value}");
        }
    }

    #[test]
    fn strips_input() {
        let field = HexaDecimalFormField::builder().build();
        assert_eq!(field.clean(Some("  ff \n")).as_deref(), Ok("ff"));
        let field = HexaDecimalFormField::builder().strip(false).build();
        assert_eq!(
            field.clean(Some(" ff")).map_err(|e| e.codes().join(",")),
            Err("invalid".to_string()),
        );
    }

    #[test]
    fn required_and_optional() {
        let field = HexaDecimalFormField::builder().build();
        assert_eq!(
            field.clean(None),
            Err(ValidationError::new(REQUIRED_MESSAGE, "required").into()),
        );
        assert_eq!(
            field.clean(Some("   ")).map_err(|e| e.codes().join(",")),
            Err("required".to_string()),
        );

        let field = HexaDecimalFormField::builder().required(false).build();
        assert_eq!(field.clean(None).as_deref(), Ok(""));
        assert_eq!(field.clean(Some("")).as_deref(), Ok(""));
    }

    #[test]
    fn translated_messages() {
        let field = HexaDecimalFormField::builder()
            .invalid_message("Geben Sie eine gültige Hexadezimalzahl ein")
            .required_message("Dieses Feld ist zwingend erforderlich.")
            .build();
        assert_eq!(
            field.clean(Some("zz")).map_err(|e| e.to_string()),
            Err("Geben Sie eine gültige Hexadezimalzahl ein".to_string()),
        );
        assert_eq!(
            field.clean(None).map_err(|e| e.to_string()),
            Err("Dieses Feld ist zwingend erforderlich.".to_string()),
        );
    }

    #[test]
    fn instances_do_not_share_validators() {
        let limited = HexaDecimalFormField::builder()
            .max_length(Some(4))
            .build();
        let plain = HexaDecimalFormField::builder().build();
        assert_eq!(limited.validators().len(), 2);
        assert_eq!(plain.validators().len(), 1);
        assert_eq!(
            limited.clean(Some("abcde")).map_err(|e| e.codes().join(",")),
            Err("max_length".to_string()),
        );
        assert_eq!(plain.clean(Some("abcde")).as_deref(), Ok("abcde"));
    }

    #[test]
    fn prepare_value() {
        let field = HexaDecimalFormField::builder().build();
        assert_eq!(
            field.prepare_value(Some(&FieldValue::Decimal(Decimal::from(1715004u64)))).as_deref(),
            Some("1a2b3c"),
        );
        assert_eq!(
            field.prepare_value(Some(&FieldValue::Decimal(Decimal::from(0u64)))).as_deref(),
            Some("0"),
        );
        assert_eq!(
            field.prepare_value(Some(&FieldValue::Hex("0xFF".into()))).as_deref(),
            Some("0xFF"),
        );
        assert_eq!(field.prepare_value(None), None);
    }
}
