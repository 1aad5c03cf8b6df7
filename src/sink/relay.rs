use super::{SinkError, SubmissionSink};
use crate::core::payload::{ContactPayload, RelayPayload};
use crate::task::CancelToken;
use chrono::Utc;
use std::time::Duration;
use tracing::debug;

/// Fire-and-forget spreadsheet webhook.
///
/// The response is never inspected: a request that leaves without a transport
/// error counts as delivered, even if the webhook rejected it. Delivery is
/// best-effort and this sink cannot tell otherwise.
pub struct RelaySink {
    webhook_url: String,
    agent: ureq::Agent,
}

impl RelaySink {
    pub fn new(webhook_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            webhook_url: webhook_url.into(),
            agent,
        }
    }
}

impl SubmissionSink for RelaySink {
    fn name(&self) -> &str {
        "relay"
    }

    fn deliver(&self, payload: &ContactPayload, cancel: &CancelToken) -> Result<(), SinkError> {
        if cancel.is_cancelled() {
            return Err(SinkError::Cancelled);
        }

        let body = RelayPayload::new(payload.clone(), Utc::now());
        match self.agent.post(&self.webhook_url).send_json(&body) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => {
                debug!(status, "relay response discarded");
                Ok(())
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(SinkError::Transport(transport.to_string()))
            }
        }
    }
}
