//! HTTP client for the external face-recognition service.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use pipeline_core::{Error, Result};

use crate::config::RecognitionConfig;

/// At most one candidate match is requested per search.
pub const MAX_FACES: u32 = 1;

/// Minimum similarity for a candidate to count as a match, percent.
pub const SIMILARITY_THRESHOLD: f32 = 90.0;

/// A face matched against the reference collection.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceMatch {
    pub face_id: String,
    pub similarity: f32,
}

/// A face newly enrolled into the reference collection.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceRecord {
    pub face_id: String,
}

/// The two operations the external service offers.
#[async_trait]
pub trait FaceRecognizer: Send + Sync {
    /// Searches the reference collection for a face matching `image`.
    /// Returns the best candidate clearing the similarity threshold, if any.
    async fn search_face(&self, image: &[u8]) -> Result<Option<FaceMatch>>;

    /// Enrolls the face in `image` into the reference collection.
    async fn enroll_face(&self, image: &[u8]) -> Result<FaceRecord>;
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    image: &'a str,
    max_faces: u32,
    similarity_threshold: f32,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    matches: Vec<FaceMatch>,
}

#[derive(Serialize)]
struct EnrollRequest<'a> {
    image: &'a str,
}

/// Recognition service client.
#[derive(Clone)]
pub struct RecognitionClient {
    config: RecognitionConfig,
    http_client: reqwest::Client,
}

impl RecognitionClient {
    /// Creates a new recognition client.
    pub fn new(config: RecognitionConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::recognition(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Ensures the reference collection exists. Safe to call on every
    /// startup; an already-existing collection is not an error.
    pub async fn ensure_collection(&self) -> Result<()> {
        let url = format!("{}/collections/{}", self.config.base_url, self.config.collection_id);

        let response = self.http_client.put(&url).send().await.map_err(|e| {
            warn!(error = %e, "Collection setup request failed");
            Error::recognition(format!("recognition service unavailable: {e}"))
        })?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::CONFLICT {
            debug!(collection = %self.config.collection_id, "Reference collection ready");
            Ok(())
        } else {
            Err(Error::recognition(format!(
                "collection setup returned {status}"
            )))
        }
    }
}

#[async_trait]
impl FaceRecognizer for RecognitionClient {
    async fn search_face(&self, image: &[u8]) -> Result<Option<FaceMatch>> {
        let url = format!(
            "{}/collections/{}/search",
            self.config.base_url, self.config.collection_id
        );
        let encoded = STANDARD.encode(image);

        debug!(collection = %self.config.collection_id, "Searching for matching face");

        let response = self
            .http_client
            .post(&url)
            .json(&SearchRequest {
                image: &encoded,
                max_faces: MAX_FACES,
                similarity_threshold: SIMILARITY_THRESHOLD,
            })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Face search request failed");
                Error::recognition(format!("recognition service unavailable: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::recognition(format!("face search returned {status}")));
        }

        let body: SearchResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse search response");
            Error::recognition(format!("invalid search response: {e}"))
        })?;

        Ok(body.matches.into_iter().next())
    }

    async fn enroll_face(&self, image: &[u8]) -> Result<FaceRecord> {
        let url = format!(
            "{}/collections/{}/faces",
            self.config.base_url, self.config.collection_id
        );
        let encoded = STANDARD.encode(image);

        let response = self
            .http_client
            .post(&url)
            .json(&EnrollRequest { image: &encoded })
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Face enrollment request failed");
                Error::recognition(format!("recognition service unavailable: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::recognition(format!("enrollment returned {status}")));
        }

        let record: FaceRecord = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse enrollment response");
            Error::recognition(format!("invalid enrollment response: {e}"))
        })?;

        Ok(record)
    }
}
