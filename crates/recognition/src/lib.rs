//! Face-recognition decision engine.
//!
//! Decides, for a photo, whether it matches a known identity: content
//! digest, verdict cache, then the external recognition service. Owns the
//! only mutation path into the cache.

pub mod analyzer;
pub mod cache;
pub mod client;
pub mod config;

pub use analyzer::PhotoAnalyzer;
pub use cache::VerdictCache;
pub use client::{FaceMatch, FaceRecognizer, FaceRecord, RecognitionClient};
pub use config::RecognitionConfig;
