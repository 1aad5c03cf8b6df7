use crate::core::payload::ContactPayload;
use crate::sink::{SinkError, SubmissionSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub struct SubmissionInvocation {
    pub run_id: u64,
    pub payload: ContactPayload,
    pub sink: Arc<dyn SubmissionSink>,
    pub cancel_token: CancelToken,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionCompletion {
    pub run_id: u64,
    pub sink: String,
    pub result: Result<(), SinkError>,
}

pub fn execute_invocation(invocation: SubmissionInvocation) -> SubmissionCompletion {
    let SubmissionInvocation {
        run_id,
        payload,
        sink,
        cancel_token,
        timeout,
    } = invocation;
    let sink_name = sink.name().to_string();

    if cancel_token.is_cancelled() {
        return SubmissionCompletion {
            run_id,
            sink: sink_name,
            result: Err(SinkError::Cancelled),
        };
    }

    let (result_tx, result_rx) = mpsc::channel();
    let worker_token = cancel_token.clone();
    std::thread::spawn(move || {
        let result = sink.deliver(&payload, &worker_token);
        let _ = result_tx.send(result);
    });

    let timeout = timeout.max(Duration::from_millis(1));
    let result = match result_rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            cancel_token.cancel();
            Err(SinkError::Timeout(timeout.as_millis() as u64))
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(SinkError::Transport("sink worker exited without a result".to_string()))
        }
    };

    SubmissionCompletion {
        run_id,
        sink: sink_name,
        result,
    }
}
