//! Content-addressed verdict cache.

use moka::future::Cache;
use std::time::Duration;

/// Cache mapping a photo's content digest to its recognition verdict.
///
/// Only positive verdicts are stored, so a miss means "unknown or
/// expired", never "known negative". Entries expire a fixed TTL after
/// insertion, independent of access. Safe for concurrent use; moka owns
/// all synchronization.
#[derive(Clone)]
pub struct VerdictCache {
    inner: Cache<String, bool>,
}

impl VerdictCache {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Looks up a previously computed verdict by content digest.
    pub async fn get(&self, digest: &str) -> Option<bool> {
        self.inner.get(digest).await
    }

    /// Records a positive verdict. Negative verdicts are never cached.
    pub async fn put_recognized(&self, digest: String) {
        self.inner.insert(digest, true).await;
    }
}
