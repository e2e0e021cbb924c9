//! Failure taxonomy and the severity each failure is reported with.

use thiserror::Error;
use tracing::Level;

use crate::api::FetchError;
use crate::notify::SendError;

use super::interpreter::InterpretError;
use super::validator::ValidationError;

/// How far a failure is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Expected condition; debug log only.
    Silent,
    /// Error log only. Used for delivery failures so that a broken channel
    /// never triggers another delivery attempt.
    Logged,
    /// Error log plus a (deduplicated) message to the operator.
    Notified,
}

impl Severity {
    pub fn log_level(self) -> Level {
        match self {
            Severity::Silent => Level::DEBUG,
            Severity::Logged | Severity::Notified => Level::ERROR,
        }
    }

    pub fn notifies(self) -> bool {
        self == Severity::Notified
    }
}

/// Every way a poll cycle can fail.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("no new statuses")]
    NoNewStatuses,

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error(transparent)]
    Delivery(#[from] SendError),

    #[error("{0}")]
    Other(String),
}

/// A failure after classification: what to do with it and what to say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub severity: Severity,
    pub message: String,
}

impl Classified {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

pub fn classify(failure: &Failure) -> Classified {
    use Severity::*;

    match failure {
        Failure::Fetch(e @ (FetchError::Request(_) | FetchError::Status(_))) => Classified::new(
            Notified,
            format!("Failed to reach the status endpoint. Error: {e}"),
        ),
        Failure::Fetch(e @ FetchError::Decode(_)) => {
            Classified::new(Notified, format!("Program failure: {e}"))
        }
        Failure::Validation(ValidationError::NotAMapping) => {
            Classified::new(Notified, "Response is not a mapping")
        }
        Failure::Validation(ValidationError::MissingKeys) => {
            Classified::new(Notified, "Response is missing required keys")
        }
        Failure::Validation(ValidationError::WrongType) => {
            Classified::new(Notified, "Service unavailable")
        }
        Failure::NoNewStatuses => Classified::new(Silent, "No new statuses in response"),
        Failure::Interpret(InterpretError::UnknownStatus(_)) => {
            Classified::new(Notified, "Undocumented homework status")
        }
        Failure::Delivery(e) => {
            Classified::new(Logged, format!("Failed to deliver message. Error: {e}"))
        }
        Failure::Other(detail) => Classified::new(Notified, format!("Program failure: {detail}")),
    }
}
