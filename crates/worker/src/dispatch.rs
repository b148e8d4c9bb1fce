//! The dispatch state machine.
//!
//! Per message: `Received → {Terminated | Retrying → Received | Acknowledged}`.
//! Handler results are classified by a pure function so the state machine
//! is testable without a live broker; applying the action to a delivery is
//! the consumer loop's job.

use pipeline_core::{FailureClass, Result};

/// Terminal disposition for a delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Done; do not redeliver.
    Ack,
    /// Transient failure; request redelivery.
    Retry,
    /// Unprocessable; do not redeliver.
    Term,
}

/// Classifies a handler result into a terminal action.
///
/// Total over the error taxonomy: validation failures (including malformed
/// payloads) terminate, everything else retries. There is no redelivery
/// cap; transient failures redeliver until they stop being transient.
pub fn classify<T>(result: &Result<T>) -> Action {
    match result {
        Ok(_) => Action::Ack,
        Err(e) => match e.class() {
            FailureClass::Validation => Action::Term,
            FailureClass::Infrastructure => Action::Retry,
        },
    }
}
