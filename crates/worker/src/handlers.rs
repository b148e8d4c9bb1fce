//! Per-kind domain actions run for each delivered message.
//!
//! Every handler re-validates its payload. Producers are supposed to
//! validate before enqueueing, but nothing stops a message from arriving
//! on the subject some other way.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use pipeline_core::{decode_strict, GpsEvent, GyroscopeEvent, PhotoEvent, Result};
use postgres_store::TelemetryStore;
use recognition::PhotoAnalyzer;

/// A kind-specific domain action over a raw delivery payload.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Deserializes, re-validates, and runs the domain action. The returned
    /// error carries its own failure class; classification into a terminal
    /// action happens in the dispatch layer.
    async fn handle(&self, payload: &[u8]) -> Result<()>;
}

/// Persists gyroscope samples.
pub struct GyroscopeHandler {
    store: Arc<dyn TelemetryStore>,
}

impl GyroscopeHandler {
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventHandler for GyroscopeHandler {
    async fn handle(&self, payload: &[u8]) -> Result<()> {
        let event: GyroscopeEvent = decode_strict(payload)?;
        event.check()?;
        self.store.insert_gyroscope(&event).await?;

        debug!(
            device_id = event.device_id.as_deref().unwrap_or(""),
            "Processed gyroscope sample"
        );
        Ok(())
    }
}

/// Persists GPS fixes.
pub struct GpsHandler {
    store: Arc<dyn TelemetryStore>,
}

impl GpsHandler {
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventHandler for GpsHandler {
    async fn handle(&self, payload: &[u8]) -> Result<()> {
        let event: GpsEvent = decode_strict(payload)?;
        event.check()?;
        self.store.insert_gps(&event).await?;

        debug!(
            device_id = event.device_id.as_deref().unwrap_or(""),
            "Processed gps fix"
        );
        Ok(())
    }
}

/// Runs the photo pipeline: recognition verdict plus persistence.
pub struct PhotoHandler {
    analyzer: Arc<PhotoAnalyzer>,
}

impl PhotoHandler {
    pub fn new(analyzer: Arc<PhotoAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[async_trait]
impl EventHandler for PhotoHandler {
    async fn handle(&self, payload: &[u8]) -> Result<()> {
        let event: PhotoEvent = decode_strict(payload)?;
        // The analyzer re-validates and owns the verdict.
        let recognized = self.analyzer.analyze_and_store(event).await?;

        debug!(recognized, "Processed photo");
        Ok(())
    }
}
