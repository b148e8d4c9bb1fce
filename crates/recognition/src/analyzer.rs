//! The recognition decision engine.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, info, warn};

use observability::metrics;
use pipeline_core::{Error, PhotoEvent, Result};
use postgres_store::TelemetryStore;

use crate::cache::VerdictCache;
use crate::client::FaceRecognizer;

/// Decides recognition verdicts for photos and persists the result.
///
/// The cache is owned here; nothing else writes to it. The engine is safe
/// to run twice for the same logical event, which at-least-once delivery
/// requires.
pub struct PhotoAnalyzer {
    recognizer: Arc<dyn FaceRecognizer>,
    store: Arc<dyn TelemetryStore>,
    cache: VerdictCache,
}

impl PhotoAnalyzer {
    pub fn new(
        recognizer: Arc<dyn FaceRecognizer>,
        store: Arc<dyn TelemetryStore>,
        cache: VerdictCache,
    ) -> Self {
        Self {
            recognizer,
            store,
            cache,
        }
    }

    /// Produces a recognition verdict for the photo and persists the event
    /// with that verdict populated.
    pub async fn analyze_and_store(&self, mut event: PhotoEvent) -> Result<bool> {
        event.check()?;

        let photo = event
            .photo
            .as_deref()
            .ok_or_else(|| Error::missing_field("photo"))?;
        let image = STANDARD.decode(photo).map_err(|e| {
            warn!(error = %e, "Photo payload is not decodable base64");
            Error::InvalidImage
        })?;

        let digest = hex::encode(Sha256::digest(&image));

        if let Some(verdict) = self.cache.get(&digest).await {
            metrics().cache_hits.inc();
            debug!(digest = %digest, verdict, "Verdict cache hit");
            event.recognized = verdict;
            self.store.insert_photo(&event).await?;
            return Ok(verdict);
        }

        metrics().cache_misses.inc();
        debug!(digest = %digest, "Verdict cache miss, querying recognition service");

        let recognized = match self.recognizer.search_face(&image).await? {
            Some(found) => {
                info!(
                    face_id = %found.face_id,
                    similarity = found.similarity,
                    "Face matched in reference collection"
                );
                metrics().faces_matched.inc();
                true
            }
            None => {
                // Best effort: make this face findable next time. The
                // verdict for this event is already false either way.
                match self.recognizer.enroll_face(&image).await {
                    Ok(record) => {
                        info!(face_id = %record.face_id, "Enrolled new face");
                        metrics().faces_enrolled.inc();
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to enroll face");
                        metrics().enrollment_errors.inc();
                    }
                }
                false
            }
        };

        if recognized {
            self.cache.put_recognized(digest).await;
        }

        event.recognized = recognized;
        self.store.insert_photo(&event).await?;

        Ok(recognized)
    }
}
