use super::{SinkError, SubmissionSink};
use crate::core::payload::ContactPayload;
use crate::task::CancelToken;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts the payload as JSON to a contact backend. Only a `200` with a JSON
/// body counts as accepted.
pub struct RestSink {
    endpoint: String,
    agent: ureq::Agent,
}

impl RestSink {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            endpoint: endpoint.into(),
            agent,
        }
    }
}

impl SubmissionSink for RestSink {
    fn name(&self) -> &str {
        "rest"
    }

    fn deliver(&self, payload: &ContactPayload, cancel: &CancelToken) -> Result<(), SinkError> {
        if cancel.is_cancelled() {
            return Err(SinkError::Cancelled);
        }

        debug!(endpoint = %self.endpoint, "posting contact payload");
        match self.agent.post(&self.endpoint).send_json(payload) {
            Ok(response) if response.status() == 200 => response
                .into_json::<serde_json::Value>()
                .map(|_| ())
                .map_err(|err| SinkError::Transport(format!("unreadable response body: {err}"))),
            Ok(response) => {
                let status = response.status();
                Err(SinkError::Remote {
                    status,
                    message: error_message(response),
                })
            }
            Err(ureq::Error::Status(status, response)) => Err(SinkError::Remote {
                status,
                message: error_message(response),
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(SinkError::Transport(transport.to_string()))
            }
        }
    }
}

fn error_message(response: ureq::Response) -> Option<String> {
    response
        .into_json::<ErrorBody>()
        .ok()
        .and_then(|body| body.error)
}
