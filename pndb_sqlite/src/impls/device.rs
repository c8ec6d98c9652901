use async_trait::async_trait;
use pncore::{
    device::{
        GcmDevice,
        GcmDevices,
        NewGcmDevice,
        traits::GcmDeviceBackend,
    },
    error::BackendError,
    field::FieldValue,
    hexdecimal::Decimal,
};
use sqlx::FromRow;

use crate::{
    SqliteBackend,
    chrono::Utc,
};

#[derive(FromRow)]
struct GcmDeviceRow {
    id: i64,
    name: Option<String>,
    active: bool,
    user_id: Option<i64>,
    created_ts: i64,
    device_id: Option<Decimal>,
    registration_id: String,
    cloud_message_type: String,
    application_id: Option<String>,
}

impl SqliteBackend {
    fn prep_device_id(
        &self,
        device_id: Option<&str>,
    ) -> Result<Option<Decimal>, BackendError> {
        let value = device_id.map(FieldValue::from);
        Ok(self.device_id.get_prep_value(value.as_ref())?)
    }

    fn bind_device(
        &self,
        row: GcmDeviceRow,
    ) -> Result<GcmDevice, BackendError> {
        Ok(GcmDevice {
            id: row.id,
            name: row.name,
            active: row.active,
            user_id: row.user_id,
            created_ts: row.created_ts,
            device_id: self.device_id.from_db_value(row.device_id),
            registration_id: row.registration_id,
            cloud_message_type: row.cloud_message_type.parse()
                .map_err(BackendError::AppInvariantViolation)?,
            application_id: row.application_id,
        })
    }

    fn bind_devices(
        &self,
        rows: Vec<GcmDeviceRow>,
    ) -> Result<GcmDevices, BackendError> {
        rows.into_iter()
            .map(|row| self.bind_device(row))
            .collect::<Result<Vec<_>, _>>()
            .map(GcmDevices::from)
    }
}

#[async_trait]
impl GcmDeviceBackend for SqliteBackend {
    async fn add_gcm_device(
        &self,
        device: &NewGcmDevice,
    ) -> Result<i64, BackendError> {
        let device_id = self.prep_device_id(device.device_id.as_deref())?;
        let ts = Utc::now().timestamp();
        let id = sqlx::query(
            r#"
INSERT INTO gcm_device (
    name,
    active,
    user_id,
    created_ts,
    device_id,
    registration_id,
    cloud_message_type,
    application_id
)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8 )
            "#,
        )
        .bind(device.name.as_deref())
        .bind(device.active)
        .bind(device.user_id)
        .bind(ts)
        .bind(device_id)
        .bind(device.registration_id.as_str())
        .bind(device.cloud_message_type.as_str())
        .bind(device.application_id.as_deref())
        .execute(&*self.pool)
        .await?
        .last_insert_rowid();
        Ok(id)
    }

    async fn get_gcm_device(
        &self,
        id: i64,
    ) -> Result<GcmDevice, BackendError> {
        let row = sqlx::query_as::<_, GcmDeviceRow>(
            r#"
SELECT
    id,
    name,
    active,
    user_id,
    created_ts,
    device_id,
    registration_id,
    cloud_message_type,
    application_id
FROM gcm_device
WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_one(&*self.pool)
        .await?;
        self.bind_device(row)
    }

    async fn list_gcm_devices(
        &self,
    ) -> Result<GcmDevices, BackendError> {
        let rows = sqlx::query_as::<_, GcmDeviceRow>(
            r#"
SELECT
    id,
    name,
    active,
    user_id,
    created_ts,
    device_id,
    registration_id,
    cloud_message_type,
    application_id
FROM gcm_device
ORDER BY id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;
        self.bind_devices(rows)
    }

    async fn list_gcm_devices_by_device_id(
        &self,
        device_id: &str,
    ) -> Result<GcmDevices, BackendError> {
        // an empty device_id is stored as NULL, hence `IS`
        let device_id = self.prep_device_id(Some(device_id))?;
        let rows = sqlx::query_as::<_, GcmDeviceRow>(
            r#"
SELECT
    id,
    name,
    active,
    user_id,
    created_ts,
    device_id,
    registration_id,
    cloud_message_type,
    application_id
FROM gcm_device
WHERE device_id IS ?1
ORDER BY id
            "#,
        )
        .bind(device_id)
        .fetch_all(&*self.pool)
        .await?;
        self.bind_devices(rows)
    }

    async fn set_gcm_device_active(
        &self,
        id: i64,
        active: bool,
    ) -> Result<bool, BackendError> {
        let rows_affected = sqlx::query(
            r#"
UPDATE gcm_device
SET active = ?2
WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(active)
        .execute(&*self.pool)
        .await?
        .rows_affected();
        Ok(rows_affected > 0)
    }

    async fn set_gcm_device_device_id(
        &self,
        id: i64,
        device_id: Option<&str>,
    ) -> Result<bool, BackendError> {
        let device_id = self.prep_device_id(device_id)?;
        let rows_affected = sqlx::query(
            r#"
UPDATE gcm_device
SET device_id = ?2
WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(device_id)
        .execute(&*self.pool)
        .await?
        .rows_affected();
        Ok(rows_affected > 0)
    }

    async fn delete_gcm_device(
        &self,
        id: i64,
    ) -> Result<bool, BackendError> {
        let rows_affected = sqlx::query(
            r#"
DELETE FROM gcm_device
WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&*self.pool)
        .await?
        .rows_affected();
        Ok(rows_affected > 0)
    }
}
