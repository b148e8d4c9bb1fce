//! Recognition service configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external recognition service and verdict cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Recognition service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Reference collection holding enrolled face templates
    #[serde(default = "default_collection_id")]
    pub collection_id: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Verdict cache time-to-live in seconds, counted from insertion
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Maximum verdict cache entries
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

fn default_base_url() -> String {
    "http://localhost:9090".to_string()
}

fn default_collection_id() -> String {
    "fieldtrack-faces".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_capacity() -> u64 {
    10_000
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection_id: default_collection_id(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_capacity: default_cache_capacity(),
        }
    }
}
