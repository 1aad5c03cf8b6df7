//! Destinations for a validated contact payload.
//!
//! A sink is called from a worker thread and may block. It should check the
//! [`CancelToken`] before doing anything expensive; once the token is
//! cancelled its result is discarded.

pub mod mirrored;
pub mod recording;
pub mod relay;
pub mod rest;

use crate::core::payload::ContactPayload;
use crate::task::CancelToken;
use thiserror::Error;

pub use mirrored::MirroredSink;
pub use recording::RecordingSink;
pub use relay::RelaySink;
pub use rest::RestSink;

pub const GENERIC_FAILURE: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// The request could not be dispatched or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The destination answered with something other than success.
    #[error("remote rejected submission with status {status}")]
    Remote {
        status: u16,
        message: Option<String>,
    },

    #[error("sink call timed out after {0}ms")]
    Timeout(u64),

    #[error("submission cancelled")]
    Cancelled,
}

impl SinkError {
    /// Text shown under the message field after a failed submission.
    pub fn user_message(&self) -> String {
        match self {
            Self::Remote {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

pub trait SubmissionSink: Send + Sync {
    fn name(&self) -> &str;

    fn deliver(&self, payload: &ContactPayload, cancel: &CancelToken) -> Result<(), SinkError>;
}
