use async_trait::async_trait;
use mockall::mock;
use pncore::{
    device::{
        GcmDevice,
        GcmDevices,
        NewGcmDevice,
        traits::GcmDeviceBackend,
    },
    error::BackendError,
    platform::PlatformUrl,
};

mock! {
    pub Platform {
        pub async fn gcm_device_add(
            &self,
            device: NewGcmDevice,
        ) -> Result<i64, BackendError>;
        pub async fn gcm_device_get(
            &self,
            id: i64,
        ) -> Result<GcmDevice, BackendError>;
        pub async fn gcm_device_list(
            &self,
        ) -> Result<GcmDevices, BackendError>;
        pub async fn gcm_device_list_by_device_id(
            &self,
            device_id: String,
        ) -> Result<GcmDevices, BackendError>;
        pub async fn gcm_device_set_active(
            &self,
            id: i64,
            active: bool,
        ) -> Result<bool, BackendError>;
        pub async fn gcm_device_set_device_id(
            &self,
            id: i64,
            device_id: Option<String>,
        ) -> Result<bool, BackendError>;
        pub async fn gcm_device_delete(
            &self,
            id: i64,
        ) -> Result<bool, BackendError>;
    }
}

impl PlatformUrl for MockPlatform {
    fn url(&self) -> &str {
        "mock::"
    }
}

// mockall has trouble with the borrowed arguments, so the trait simply
// forwards to the owned variants declared above.
#[async_trait]
impl GcmDeviceBackend for MockPlatform {
    async fn add_gcm_device(
        &self,
        device: &NewGcmDevice,
    ) -> Result<i64, BackendError> {
        self.gcm_device_add(device.clone()).await
    }
    async fn get_gcm_device(
        &self,
        id: i64,
    ) -> Result<GcmDevice, BackendError> {
        self.gcm_device_get(id).await
    }
    async fn list_gcm_devices(
        &self,
    ) -> Result<GcmDevices, BackendError> {
        self.gcm_device_list().await
    }
    async fn list_gcm_devices_by_device_id(
        &self,
        device_id: &str,
    ) -> Result<GcmDevices, BackendError> {
        self.gcm_device_list_by_device_id(device_id.to_string()).await
    }
    async fn set_gcm_device_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<bool, BackendError> {
        self.gcm_device_set_active(id, active).await
    }
    async fn set_gcm_device_device_id(
        &self,
        id: i64,
        device_id: Option<&str>,
    ) -> Result<bool, BackendError> {
        self.gcm_device_set_device_id(id, device_id.map(str::to_string)).await
    }
    async fn delete_gcm_device(
        &self,
        id: i64,
    ) -> Result<bool, BackendError> {
        self.gcm_device_delete(id).await
    }
}
