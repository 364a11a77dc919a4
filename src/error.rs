//! Error types for the intake service.

use thiserror::Error;

/// Why a submission was not stored.
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// Missing required field or no usable material line. Nothing was written.
    #[error("{0}")]
    Validation(String),

    /// The database rejected the submission. Nothing was written.
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

/// Why a notification email was not delivered. Never surfaced to the user.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("mail delivery is not configured")]
    Disabled,

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
