use async_trait::async_trait;
use std::error::Error;

use crate::{
    device::{
        FormError,
        GcmDevice,
        GcmDeviceForm,
        clean_device_id,
        traits::GcmDeviceBackend,
    },
};

pub trait PlatformUrl {
    fn url(&self) -> &str;
}

/// DevicePlatform - the platform for managing the devices registered for
/// notifications.
///
/// It is applicable to everything that correctly implements the relevant
/// backends that compose this trait.  The provided methods validate user
/// input before any of it reaches the backend.
#[async_trait]
pub trait DevicePlatform: GcmDeviceBackend
    + PlatformUrl
    + Send
    + Sync
{
    fn as_dyn(&self) -> &dyn DevicePlatform;

    /// Register a device from raw form input, returning the stored record.
    async fn register_gcm_device(
        &self,
        form: &GcmDeviceForm,
    ) -> Result<GcmDevice, FormError> {
        let id = form.save(self.as_dyn()).await?;
        Ok(GcmDeviceBackend::get_gcm_device(self, id).await?)
    }

    /// Change the device id from raw user input; an empty or absent value
    /// clears it.
    async fn change_gcm_device_id(
        &self,
        id: i64,
        device_id: Option<&str>,
    ) -> Result<bool, FormError> {
        let device_id = clean_device_id(device_id)
            .map_err(|e| FormError::Invalid(("device_id", e).into()))?;
        Ok(GcmDeviceBackend::set_gcm_device_device_id(
            self,
            id,
            device_id.as_deref(),
        ).await?)
    }
}

impl<P: GcmDeviceBackend
    + PlatformUrl
    + Send
    + Sync
> DevicePlatform for P {
    fn as_dyn(&self) -> &dyn DevicePlatform {
        self
    }
}

/// Where a backend keeps its devices, and whether that store may be
/// created on connect.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectorOption {
    pub url: String,
    pub auto_create_db: bool,
}

impl ConnectorOption {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auto_create_db: false,
        }
    }

    pub fn auto_create_db(self, auto_create_db: bool) -> Self {
        Self { auto_create_db, ..self }
    }
}

impl From<&str> for ConnectorOption {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<&String> for ConnectorOption {
    fn from(url: &String) -> Self {
        Self::new(url.as_str())
    }
}

impl From<String> for ConnectorOption {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

#[async_trait]
pub trait PlatformConnector {
    /// Connect to the store named by `opts` with its device schema in
    /// place.
    async fn devices(
        opts: ConnectorOption,
    ) -> Result<impl DevicePlatform, Box<dyn Error + Send + Sync + 'static>>;
}

#[cfg(test)]
mod tests {
    use super::ConnectorOption;

    #[test]
    fn connector_option() {
        let opts = ConnectorOption::from("sqlite::memory:");
        assert_eq!(opts.url, "sqlite::memory:");
        assert!(!opts.auto_create_db);

        let url = String::from("sqlite://devices.db");
        let opts = ConnectorOption::from(&url).auto_create_db(true);
        assert_eq!(opts, ConnectorOption {
            url: "sqlite://devices.db".into(),
            auto_create_db: true,
        });
        assert_eq!(ConnectorOption::from(url), ConnectorOption::new("sqlite://devices.db"));
    }
}
