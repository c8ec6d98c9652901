use serde::{Deserialize, Serialize};

use crate::{
    field::HexDecimalField,
    schema::AlterField,
};

#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum CloudMessageType {
    #[default]
    #[serde(rename = "FCM")]
    Fcm,
    #[serde(rename = "GCM")]
    Gcm,
}

/// A device registered for receiving notifications through Firebase
/// (or legacy Google) Cloud Messaging.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GcmDevice {
    pub id: i64,
    pub name: Option<String>,
    pub active: bool,
    pub user_id: Option<i64>,
    pub created_ts: i64,
    /// Hexadecimal device identifier, e.g. the `ANDROID_ID`.
    pub device_id: Option<String>,
    pub registration_id: String,
    pub cloud_message_type: CloudMessageType,
    pub application_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GcmDevices(Vec<GcmDevice>);

/// The values for registering a new device.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct NewGcmDevice {
    pub name: Option<String>,
    pub active: bool,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub registration_id: String,
    pub cloud_message_type: CloudMessageType,
    pub application_id: Option<String>,
}

pub const DEVICE_ID_HELP_TEXT: &str = "ANDROID_ID / TelephonyManager.getDeviceId()";

/// The field backing `GcmDevice.device_id`.
pub fn device_id_field() -> HexDecimalField {
    HexDecimalField::builder()
        .verbose_name("Device ID")
        .help_text(DEVICE_ID_HELP_TEXT)
        .max_digits(100)
        .decimal_places(0)
        .null(true)
        .blank(true)
        .db_index(true)
        .build()
}

/// The schema change that turned `device_id` into a hex backed decimal.
pub fn device_id_migration() -> AlterField {
    AlterField {
        model_name: "gcmdevice".to_string(),
        name: "device_id".to_string(),
        field: device_id_field().column("device_id"),
    }
}

mod form;
mod impls;
pub mod traits;

pub use form::{
    clean_device_id,
    FormError,
    FormErrors,
    GcmDeviceForm,
};
