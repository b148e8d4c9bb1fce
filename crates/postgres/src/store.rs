//! Telemetry store trait and its Postgres implementation.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info};

use pipeline_core::{Error, GpsEvent, GyroscopeEvent, PhotoEvent, Result};

use crate::config::PostgresConfig;
use crate::schema::TABLES;

/// Insert operations, one per record kind.
///
/// Implementations report every failure as infrastructure-class: the
/// consumer turns them into redelivery, never termination.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    async fn insert_gyroscope(&self, event: &GyroscopeEvent) -> Result<()>;
    async fn insert_gps(&self, event: &GpsEvent) -> Result<()>;
    async fn insert_photo(&self, event: &PhotoEvent) -> Result<()>;
}

/// Postgres-backed telemetry store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connects a pool against the configured database.
    pub async fn connect(config: &PostgresConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| Error::storage(format!("failed to connect to Postgres: {e}")))?;

        info!(max_connections = config.max_connections, "Connected to Postgres");

        Ok(Self { pool })
    }

    /// Creates the telemetry tables if they do not exist yet.
    pub async fn init_schema(&self) -> Result<()> {
        for ddl in TABLES {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| Error::storage(format!("failed to initialize schema: {e}")))?;
        }
        info!("Storage schema ready");
        Ok(())
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TelemetryStore for PostgresStore {
    async fn insert_gyroscope(&self, event: &GyroscopeEvent) -> Result<()> {
        sqlx::query(
            "INSERT INTO gyroscope (device_id, x, y, z, timestamp) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(event.device_id.as_deref())
        .bind(event.x)
        .bind(event.y)
        .bind(event.z)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("failed to insert gyroscope sample: {e}")))?;

        debug!(device_id = event.device_id.as_deref().unwrap_or(""), "Inserted gyroscope sample");
        Ok(())
    }

    async fn insert_gps(&self, event: &GpsEvent) -> Result<()> {
        sqlx::query(
            "INSERT INTO gps (device_id, latitude, longitude, timestamp) VALUES ($1, $2, $3, $4)",
        )
        .bind(event.device_id.as_deref())
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("failed to insert gps fix: {e}")))?;

        debug!(device_id = event.device_id.as_deref().unwrap_or(""), "Inserted gps fix");
        Ok(())
    }

    async fn insert_photo(&self, event: &PhotoEvent) -> Result<()> {
        sqlx::query(
            "INSERT INTO photo (device_id, photo, timestamp, recognized) VALUES ($1, $2, $3, $4)",
        )
        .bind(event.device_id.as_deref())
        .bind(event.photo.as_deref())
        .bind(event.timestamp)
        .bind(event.recognized)
        .execute(&self.pool)
        .await
        .map_err(|e| Error::storage(format!("failed to insert photo: {e}")))?;

        debug!(
            device_id = event.device_id.as_deref().unwrap_or(""),
            recognized = event.recognized,
            "Inserted photo"
        );
        Ok(())
    }
}
