use super::{SinkError, SubmissionSink};
use crate::core::payload::ContactPayload;
use crate::task::CancelToken;
use std::sync::Arc;
use tracing::warn;

/// Delivers to a primary sink and, once it accepts, copies the payload to a
/// best-effort mirror. Only the primary decides the outcome.
pub struct MirroredSink {
    primary: Arc<dyn SubmissionSink>,
    mirror: Arc<dyn SubmissionSink>,
}

impl MirroredSink {
    pub fn new(primary: Arc<dyn SubmissionSink>, mirror: Arc<dyn SubmissionSink>) -> Self {
        Self { primary, mirror }
    }
}

impl SubmissionSink for MirroredSink {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn deliver(&self, payload: &ContactPayload, cancel: &CancelToken) -> Result<(), SinkError> {
        self.primary.deliver(payload, cancel)?;
        if let Err(err) = self.mirror.deliver(payload, cancel) {
            warn!(mirror = self.mirror.name(), error = %err, "mirror delivery failed");
        }
        Ok(())
    }
}
