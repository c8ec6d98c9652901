use async_trait::async_trait;

use crate::{
    device::{
        GcmDevice,
        GcmDevices,
        NewGcmDevice,
    },
    error::BackendError,
};

/// Storage for [`GcmDevice`] records.
///
/// Device ids cross this boundary as hexadecimal strings; implementations
/// are responsible for the conversion to and from the stored decimal,
/// with malformed input reported as [`BackendError::Field`].
#[async_trait]
pub trait GcmDeviceBackend {
    async fn add_gcm_device(
        &self,
        device: &NewGcmDevice,
    ) -> Result<i64, BackendError>;
    async fn get_gcm_device(
        &self,
        id: i64,
    ) -> Result<GcmDevice, BackendError>;
    async fn list_gcm_devices(
        &self,
    ) -> Result<GcmDevices, BackendError>;
    async fn list_gcm_devices_by_device_id(
        &self,
        device_id: &str,
    ) -> Result<GcmDevices, BackendError>;
    async fn set_gcm_device_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<bool, BackendError>;
    async fn set_gcm_device_device_id(
        &self,
        id: i64,
        device_id: Option<&str>,
    ) -> Result<bool, BackendError>;
    async fn delete_gcm_device(
        &self,
        id: i64,
    ) -> Result<bool, BackendError>;
}
