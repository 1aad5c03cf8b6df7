use super::{SinkError, SubmissionSink};
use crate::core::payload::ContactPayload;
use crate::task::CancelToken;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

const CANCEL_POLL: Duration = Duration::from_millis(5);

#[derive(Default)]
struct Inner {
    received: Vec<ContactPayload>,
    scripted: VecDeque<Result<(), SinkError>>,
}

/// In-memory sink. Records every payload and answers with scripted results,
/// falling back to a fixed outcome once the script runs out.
///
/// Clones share the same record, so a test can keep one handle while the
/// controller owns another.
#[derive(Clone)]
pub struct RecordingSink {
    inner: Arc<Mutex<Inner>>,
    fallback: Result<(), SinkError>,
    delay: Duration,
}

impl RecordingSink {
    pub fn accepting() -> Self {
        Self::with_fallback(Ok(()))
    }

    pub fn rejecting(message: impl Into<String>) -> Self {
        Self::with_fallback(Err(SinkError::Remote {
            status: 500,
            message: Some(message.into()),
        }))
    }

    pub fn with_fallback(fallback: Result<(), SinkError>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            fallback,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn push_outcome(&self, outcome: Result<(), SinkError>) {
        self.lock().scripted.push_back(outcome);
    }

    pub fn received(&self) -> Vec<ContactPayload> {
        self.lock().received.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().received.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn wait_out_delay(&self, cancel: &CancelToken) -> Result<(), SinkError> {
        let started_at = Instant::now();
        while started_at.elapsed() < self.delay {
            if cancel.is_cancelled() {
                return Err(SinkError::Cancelled);
            }
            std::thread::sleep(CANCEL_POLL.min(self.delay));
        }
        Ok(())
    }
}

impl SubmissionSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn deliver(&self, payload: &ContactPayload, cancel: &CancelToken) -> Result<(), SinkError> {
        if cancel.is_cancelled() {
            return Err(SinkError::Cancelled);
        }
        let outcome = {
            let mut inner = self.lock();
            inner.received.push(payload.clone());
            inner.scripted.pop_front()
        };
        self.wait_out_delay(cancel)?;
        outcome.unwrap_or_else(|| self.fallback.clone())
    }
}
