//! Mock implementations for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use jetstream::EventPublisher;
use pipeline_core::{Error, EventKind, GpsEvent, GyroscopeEvent, PhotoEvent, Result};
use postgres_store::TelemetryStore;
use recognition::{FaceMatch, FaceRecognizer, FaceRecord};

/// Mock publisher that captures published payloads in memory.
///
/// Implements the same `EventPublisher` trait as the JetStream publisher,
/// so tests can assert on the exact messages that would be queued without
/// a broker.
#[derive(Clone)]
pub struct MockPublisher {
    messages: Arc<Mutex<Vec<(EventKind, Vec<u8>)>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// All messages published so far.
    pub fn published(&self) -> Vec<(EventKind, Vec<u8>)> {
        self.messages.lock().clone()
    }

    pub fn published_count(&self) -> usize {
        self.messages.lock().len()
    }

    /// Simulate a broker outage.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockPublisher {
    async fn publish(&self, kind: EventKind, payload: Vec<u8>) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::queue("mock publisher failure"));
        }
        self.messages.lock().push((kind, payload));
        Ok(())
    }
}

/// In-memory telemetry store capturing inserted rows.
#[derive(Default)]
pub struct MemoryStore {
    pub gyroscope: Mutex<Vec<GyroscopeEvent>>,
    pub gps: Mutex<Vec<GpsEvent>>,
    pub photos: Mutex<Vec<PhotoEvent>>,
    should_fail: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a storage outage.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl TelemetryStore for MemoryStore {
    async fn insert_gyroscope(&self, event: &GyroscopeEvent) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::storage("mock storage failure"));
        }
        self.gyroscope.lock().push(event.clone());
        Ok(())
    }

    async fn insert_gps(&self, event: &GpsEvent) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::storage("mock storage failure"));
        }
        self.gps.lock().push(event.clone());
        Ok(())
    }

    async fn insert_photo(&self, event: &PhotoEvent) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::storage("mock storage failure"));
        }
        self.photos.lock().push(event.clone());
        Ok(())
    }
}

/// Scriptable recognizer with call counting.
pub struct MockRecognizer {
    pub match_result: Option<FaceMatch>,
    search_calls: Mutex<usize>,
    enroll_calls: Mutex<usize>,
    pub search_fails: bool,
    pub enroll_fails: bool,
}

impl MockRecognizer {
    /// Recognizer whose searches always match.
    pub fn matching() -> Self {
        Self {
            match_result: Some(FaceMatch {
                face_id: "face-1".into(),
                similarity: 97.0,
            }),
            search_calls: Mutex::new(0),
            enroll_calls: Mutex::new(0),
            search_fails: false,
            enroll_fails: false,
        }
    }

    /// Recognizer whose searches never match.
    pub fn unmatched() -> Self {
        Self {
            match_result: None,
            ..Self::matching()
        }
    }

    /// Recognizer whose searches fail outright.
    pub fn failing_search() -> Self {
        Self {
            search_fails: true,
            ..Self::matching()
        }
    }

    /// Recognizer that never matches and fails enrollment.
    pub fn failing_enrollment() -> Self {
        Self {
            enroll_fails: true,
            ..Self::unmatched()
        }
    }

    pub fn search_calls(&self) -> usize {
        *self.search_calls.lock()
    }

    pub fn enroll_calls(&self) -> usize {
        *self.enroll_calls.lock()
    }
}

#[async_trait]
impl FaceRecognizer for MockRecognizer {
    async fn search_face(&self, _image: &[u8]) -> Result<Option<FaceMatch>> {
        *self.search_calls.lock() += 1;
        if self.search_fails {
            return Err(Error::recognition("mock search failure"));
        }
        Ok(self.match_result.clone())
    }

    async fn enroll_face(&self, _image: &[u8]) -> Result<FaceRecord> {
        *self.enroll_calls.lock() += 1;
        if self.enroll_fails {
            return Err(Error::recognition("mock enrollment failure"));
        }
        Ok(FaceRecord {
            face_id: "face-new".into(),
        })
    }
}
