//! Fieldtrack telemetry ingestion pipeline
//!
//! Field devices POST gyroscope, GPS, and photo events; the producer
//! boundary validates and queues them on JetStream, and per-subject
//! consumers process them into Postgres. Photos additionally run through
//! the face-recognition decision engine.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use api::{router, AppState};
use jetstream::{JetStreamPublisher, NatsClient, NatsConfig};
use observability::init_tracing_from_env;
use postgres_store::{PostgresConfig, PostgresStore, TelemetryStore};
use recognition::{PhotoAnalyzer, RecognitionClient, RecognitionConfig, VerdictCache};
use worker::WorkerRunner;

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    nats: NatsConfig,

    #[serde(default)]
    postgres: PostgresConfig,

    #[serde(default)]
    recognition: RecognitionConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            nats: NatsConfig::default(),
            postgres: PostgresConfig::default(),
            recognition: RecognitionConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Fieldtrack pipeline v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    info!(
        nats_url = %config.nats.url,
        stream = %config.nats.stream,
        "Loaded NATS config"
    );

    // Connect NATS and make sure the telemetry stream exists
    let nats = NatsClient::connect(&config.nats)
        .await
        .context("Failed to connect to NATS")?;
    nats.ensure_stream(&config.nats.stream)
        .await
        .context("Failed to ensure telemetry stream")?;

    if nats.is_connected() {
        info!("NATS connection: healthy");
    } else {
        warn!("NATS connection: unhealthy");
    }

    // Connect Postgres
    let store = Arc::new(
        PostgresStore::connect(&config.postgres)
            .await
            .context("Failed to connect to Postgres")?,
    );

    // Initialize storage schema
    if let Err(e) = store.init_schema().await {
        error!("Failed to initialize storage schema: {}", e);
        // Continue anyway - schema might already exist
    }

    // Recognition service client and decision engine
    let recognizer = Arc::new(
        RecognitionClient::new(config.recognition.clone())
            .context("Failed to create recognition client")?,
    );
    if let Err(e) = recognizer.ensure_collection().await {
        warn!("Reference collection setup failed, continuing: {}", e);
    }

    let cache = VerdictCache::new(
        Duration::from_secs(config.recognition.cache_ttl_secs),
        config.recognition.cache_capacity,
    );
    let telemetry_store: Arc<dyn TelemetryStore> = store.clone();
    let analyzer = Arc::new(PhotoAnalyzer::new(
        recognizer,
        telemetry_store.clone(),
        cache,
    ));

    // Start one consumer worker per telemetry subject
    let shutdown_token = CancellationToken::new();
    let runner = WorkerRunner::new(
        config.nats.clone(),
        nats.jetstream().clone(),
        telemetry_store,
        analyzer,
    );
    let _worker_handles = runner
        .start(shutdown_token.clone())
        .await
        .context("Failed to start telemetry consumers")?;

    // Producer boundary
    let publisher = Arc::new(JetStreamPublisher::new(nats.jetstream().clone()));
    let state = AppState::new(publisher);
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Cleanup
    info!("Shutting down...");
    shutdown_token.cancel();

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("FIELDTRACK")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested config from environment
    // The config crate's nested parsing doesn't work reliably with underscored field names
    if let Ok(url) = std::env::var("FIELDTRACK_NATS_URL") {
        config.nats.url = url;
    }
    if let Ok(url) = std::env::var("FIELDTRACK_POSTGRES_URL") {
        config.postgres.url = url;
    }
    if let Ok(base_url) = std::env::var("FIELDTRACK_RECOGNITION_BASE_URL") {
        config.recognition.base_url = base_url;
    }
    if let Ok(collection) = std::env::var("FIELDTRACK_RECOGNITION_COLLECTION_ID") {
        config.recognition.collection_id = collection;
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
