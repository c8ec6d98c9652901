use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{
        Display,
        Formatter,
        Result as FmtResult,
    },
};
use thiserror::Error;

use crate::{
    device::{
        CloudMessageType,
        NewGcmDevice,
        device_id_field,
        traits::GcmDeviceBackend,
    },
    error::{
        BackendError,
        FieldError,
        ValidationError,
        ValidationErrors,
    },
    field::FieldValue,
    form::{
        INVALID_HEX_MESSAGE,
        REQUIRED_MESSAGE,
    },
};

/// Raw, unvalidated input for registering a device, as submitted by a
/// user or client.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct GcmDeviceForm {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub registration_id: Option<String>,
    pub cloud_message_type: Option<String>,
    pub application_id: Option<String>,
}

/// Validation failures, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Error, Deserialize, Serialize)]
pub struct FormErrors(BTreeMap<String, ValidationErrors>);

#[derive(Debug, Error)]
pub enum FormError {
    #[error(transparent)]
    Invalid(#[from] FormErrors),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl FormErrors {
    pub fn get(&self, name: &str) -> Option<&ValidationErrors> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn add(&mut self, name: &str, errors: ValidationErrors) {
        let entry = self.0.entry(name.to_string()).or_default();
        for error in errors {
            entry.push(error);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<(&str, ValidationErrors)> for FormErrors {
    fn from((name, errors): (&str, ValidationErrors)) -> Self {
        let mut result = Self::default();
        result.add(name, errors);
        result
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let fields = self.0.iter()
            .map(|(name, errors)| format!("{name}: {errors}"))
            .collect::<Vec<_>>();
        f.write_str(&fields.join("; "))
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Clean a raw device id as a form would, returning the hexadecimal
/// string to store, if any.
//
// The form level hex check runs first; the model level clean then bounds
// the number of digits.  Input such as `ab0x1` satisfies the form pattern
// yet cannot be parsed, which is reported the same as any other malformed
// number here rather than surfacing at save time.
pub fn clean_device_id(value: Option<&str>) -> Result<Option<String>, ValidationErrors> {
    let field = device_id_field();
    let value = field.formfield().clean(value)?;
    if value.is_empty() {
        return Ok(None);
    }
    match field.clean(Some(FieldValue::Hex(value.clone()))) {
        Ok(_) => Ok(Some(value)),
        Err(FieldError::Validation(errors)) => Err(errors),
        Err(FieldError::Parse(e)) => {
            log::debug!("device_id {value:?} passed form validation but not parsing: {e}");
            Err(ValidationError::new(INVALID_HEX_MESSAGE, "invalid").into())
        }
    }
}

impl GcmDeviceForm {
    pub fn clean(&self) -> Result<NewGcmDevice, FormErrors> {
        let mut errors = FormErrors::default();

        let registration_id = match optional_text(self.registration_id.as_deref()) {
            Some(registration_id) => registration_id,
            None => {
                errors.add(
                    "registration_id",
                    ValidationError::new(REQUIRED_MESSAGE, "required").into(),
                );
                String::new()
            }
        };

        let device_id = clean_device_id(self.device_id.as_deref())
            .unwrap_or_else(|e| {
                errors.add("device_id", e);
                None
            });

        let cloud_message_type = match optional_text(self.cloud_message_type.as_deref()) {
            None => CloudMessageType::default(),
            Some(value) => value.parse()
                .unwrap_or_else(|_| {
                    errors.add(
                        "cloud_message_type",
                        ValidationError::new(
                            format!("Select a valid choice. {value} is not one of the available choices."),
                            "invalid_choice",
                        ).into(),
                    );
                    CloudMessageType::default()
                }),
        };

        errors.into_result()?;
        Ok(NewGcmDevice {
            name: optional_text(self.name.as_deref()),
            active: self.active.unwrap_or(true),
            user_id: self.user_id,
            device_id,
            registration_id,
            cloud_message_type,
            application_id: optional_text(self.application_id.as_deref()),
        })
    }

    /// Validates then registers the device, returning its id.  Nothing is
    /// passed to the backend unless the form is valid.
    pub async fn save<B>(&self, backend: &B) -> Result<i64, FormError>
    where
        B: GcmDeviceBackend + ?Sized + Sync,
    {
        let device = self.clean()?;
        let id = backend.add_gcm_device(&device).await?;
        log::info!("registered gcm device {id}");
        Ok(id)
    }
}
