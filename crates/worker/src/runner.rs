//! Spawns one consumer worker per event kind.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use jetstream::{durable_consumer, Context, NatsConfig};
use pipeline_core::{EventKind, Result};
use postgres_store::TelemetryStore;
use recognition::PhotoAnalyzer;

use crate::consumer::ConsumerWorker;
use crate::handlers::{EventHandler, GpsHandler, GyroscopeHandler, PhotoHandler};

/// Builds and launches the per-subject consumer workers.
pub struct WorkerRunner {
    nats: NatsConfig,
    jetstream: Context,
    store: Arc<dyn TelemetryStore>,
    analyzer: Arc<PhotoAnalyzer>,
}

impl WorkerRunner {
    pub fn new(
        nats: NatsConfig,
        jetstream: Context,
        store: Arc<dyn TelemetryStore>,
        analyzer: Arc<PhotoAnalyzer>,
    ) -> Self {
        Self {
            nats,
            jetstream,
            store,
            analyzer,
        }
    }

    /// Starts one worker task per event kind.
    pub async fn start(&self, shutdown: CancellationToken) -> Result<Vec<tokio::task::JoinHandle<()>>> {
        let mut handles = Vec::new();

        for kind in EventKind::ALL {
            let consumer = durable_consumer(&self.jetstream, &self.nats, kind).await?;
            let worker = ConsumerWorker::new(kind, consumer, self.handler_for(kind));
            let token = shutdown.clone();

            handles.push(tokio::spawn(async move {
                if let Err(e) = worker.run(token).await {
                    error!(subject = kind.subject(), error = %e, "Consumer worker fatal error");
                }
            }));
        }

        info!("Telemetry consumers started");
        Ok(handles)
    }

    fn handler_for(&self, kind: EventKind) -> Arc<dyn EventHandler> {
        match kind {
            EventKind::Gyroscope => Arc::new(GyroscopeHandler::new(self.store.clone())),
            EventKind::Gps => Arc::new(GpsHandler::new(self.store.clone())),
            EventKind::Photo => Arc::new(PhotoHandler::new(self.analyzer.clone())),
        }
    }
}
