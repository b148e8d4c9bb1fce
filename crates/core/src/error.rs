//! Unified error types for the telemetry pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// How a failure is handled by the dispatch state machine.
///
/// Validation failures are permanent: redelivering the same payload cannot
/// fix them, so the message is terminated. Infrastructure failures are
/// transient and request redelivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    Validation,
    Infrastructure,
}

/// Unified error type for the telemetry pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Undecodable base64 in a photo payload. Base64 well-formedness is not
    /// part of the validation contract (only presence is), so this is
    /// infrastructure-class.
    #[error("invalid base64 image")]
    InvalidImage,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("recognition service error: {0}")]
    Recognition(String),

    #[error("queue error: {0}")]
    Queue(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField(name.into())
    }

    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn recognition(msg: impl Into<String>) -> Self {
        Self::Recognition(msg.into())
    }

    pub fn queue(msg: impl Into<String>) -> Self {
        Self::Queue(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classifies this error for the dispatch state machine.
    ///
    /// The match is total: every new variant must pick a side here.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::UnknownField(_) | Self::MissingField(_) | Self::MalformedPayload(_) => {
                FailureClass::Validation
            }
            Self::InvalidImage
            | Self::Storage(_)
            | Self::Recognition(_)
            | Self::Queue(_)
            | Self::Serialization(_)
            | Self::Internal(_) => FailureClass::Infrastructure,
        }
    }

    pub fn is_validation(&self) -> bool {
        self.class() == FailureClass::Validation
    }

    /// Get the HTTP status code for this error at the producer boundary.
    pub fn http_status(&self) -> u16 {
        match self.class() {
            FailureClass::Validation => 400,
            FailureClass::Infrastructure => 500,
        }
    }
}
