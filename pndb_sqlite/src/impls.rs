use async_trait::async_trait;
use pncore::{
    device::device_id_field,
    platform::{
        ConnectorOption,
        DevicePlatform,
        PlatformConnector,
        PlatformUrl,
    },
};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::SqliteBackend;

impl PlatformUrl for SqliteBackend {
    fn url(&self) -> &str {
        self.url.as_ref()
    }
}

async fn ensure_database(url: &str) -> Result<(), sqlx::Error> {
    if Sqlite::database_exists(url).await.unwrap_or(false) {
        return Ok(());
    }
    log::warn!("creating missing sqlite database at {url}");
    Sqlite::create_database(url).await
}

impl SqliteBackend {
    pub async fn connect(opts: ConnectorOption) -> Result<SqliteBackend, sqlx::Error> {
        let ConnectorOption { url, auto_create_db } = opts;
        if auto_create_db {
            ensure_database(&url).await?;
        }
        let pool = SqlitePool::connect(&url).await?;
        log::debug!("connected to {url}");
        Ok(SqliteBackend {
            pool: Arc::new(pool),
            url,
            device_id: device_id_field(),
        })
    }

    pub async fn migrate(self) -> Result<Self, sqlx::Error> {
        sqlx::migrate!("./migrations").run(&*self.pool).await?;
        Ok(self)
    }

    /// Connect to the database then bring its schema up to date.
    pub async fn connect_migrated(
        opts: impl Into<ConnectorOption>,
    ) -> Result<SqliteBackend, sqlx::Error> {
        Self::connect(opts.into())
            .await?
            .migrate()
            .await
    }
}

#[async_trait]
impl PlatformConnector for SqliteBackend {
    async fn devices(
        opts: ConnectorOption,
    ) -> Result<impl DevicePlatform, Box<dyn std::error::Error + Send + Sync + 'static>> {
        let backend = SqliteBackend::connect_migrated(opts).await
            .map_err(Box::new)?;
        Ok(backend)
    }
}

mod device;

#[cfg(test)]
pub(crate) mod tests {
    use pncore::{
        device::{
            GcmDeviceForm,
            traits::GcmDeviceBackend,
        },
        platform::{
            ConnectorOption,
            DevicePlatform,
            PlatformConnector,
            PlatformUrl,
        },
    };
    use crate::SqliteBackend;

    #[async_std::test]
    async fn connect_memory() -> anyhow::Result<()> {
        let backend = SqliteBackend::connect_migrated("sqlite::memory:").await?;
        assert_eq!(backend.url(), "sqlite::memory:");
        Ok(())
    }

    #[async_std::test]
    async fn connect_create_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}/devices.db", dir.path().display());

        assert!(SqliteBackend::connect(ConnectorOption::from(&url)).await.is_err());

        let backend = SqliteBackend::connect(
            ConnectorOption::from(&url).auto_create_db(true)
        ).await?
            .migrate()
            .await?;
        assert_eq!(backend.url(), url);
        assert!(dir.path().join("devices.db").exists());
        Ok(())
    }

    #[async_std::test]
    async fn devices_connector() -> anyhow::Result<()> {
        let platform = SqliteBackend::devices("sqlite::memory:".into())
            .await
            .map_err(anyhow::Error::from_boxed)?;
        assert_eq!(platform.url(), "sqlite::memory:");

        let device = platform.register_gcm_device(&GcmDeviceForm {
            registration_id: Some("token".into()),
            device_id: Some("0x1A2B3C".into()),
            ..Default::default()
        }).await?;
        assert_eq!(device.device_id.as_deref(), Some("1a2b3c"));
        assert_eq!(platform.list_gcm_devices().await?.len(), 1);
        Ok(())
    }

    #[async_std::test]
    async fn devices_connector_missing_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}/missing.db", dir.path().display());
        assert!(SqliteBackend::devices(ConnectorOption::from(&url)).await.is_err());
        Ok(())
    }
}
