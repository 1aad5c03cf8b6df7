use crate::task::execution::{SubmissionCompletion, SubmissionInvocation, execute_invocation};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::time::Duration;

pub struct TaskExecutor {
    completion_tx: Sender<SubmissionCompletion>,
    completion_rx: Receiver<SubmissionCompletion>,
}

impl TaskExecutor {
    pub fn new() -> Self {
        let (completion_tx, completion_rx) = mpsc::channel::<SubmissionCompletion>();
        Self {
            completion_tx,
            completion_rx,
        }
    }

    pub fn spawn(&self, invocation: SubmissionInvocation) {
        let completion_tx = self.completion_tx.clone();
        std::thread::spawn(move || {
            let completion = execute_invocation(invocation);
            let _ = completion_tx.send(completion);
        });
    }

    pub fn drain_ready(&self) -> Vec<SubmissionCompletion> {
        let mut out = Vec::<SubmissionCompletion>::new();
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => out.push(completion),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    /// Blocks until one completion arrives or `timeout` passes.
    pub fn wait_next(&self, timeout: Duration) -> Option<SubmissionCompletion> {
        match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Default for TaskExecutor {
    fn default() -> Self {
        Self::new()
    }
}
