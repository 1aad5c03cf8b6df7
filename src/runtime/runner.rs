use crate::runtime::command::Command;
use crate::state::controller::ContactFormController;
use crate::state::submission::SubmitOutcome;
use std::time::{Duration, Instant};
use tracing::debug;

const IDLE_POLL: Duration = Duration::from_millis(120);

/// Drives a controller from a stream of UI commands, the way an event loop
/// would: each command is applied, then completions and timers are drained.
pub struct Runtime {
    controller: ContactFormController,
}

impl Runtime {
    pub fn new(controller: ContactFormController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &ContactFormController {
        &self.controller
    }

    pub fn dispatch(&mut self, command: Command) -> Option<SubmitOutcome> {
        let now = Instant::now();
        let outcome = match command {
            Command::UpdateField { field, value } => {
                self.controller.update_field(field, value);
                None
            }
            Command::Blur { field } => {
                let value = self.controller.fields().get(field).to_string();
                self.controller.on_field_blur(field, &value);
                None
            }
            Command::Submit => Some(self.controller.submit(now)),
        };
        self.controller.tick(now);
        outcome
    }

    pub fn run<I>(&mut self, commands: I) -> Option<SubmitOutcome>
    where
        I: IntoIterator<Item = Command>,
    {
        let mut last_outcome = None;
        for command in commands {
            if let Some(outcome) = self.dispatch(command) {
                last_outcome = Some(outcome);
            }
        }
        last_outcome
    }

    /// Keeps the loop turning until no submission is in flight or `timeout`
    /// passes. Returns whether the form settled.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.controller.is_submitting() {
            let now = Instant::now();
            if now >= deadline {
                debug!("gave up waiting for submission to settle");
                return false;
            }
            let wait = self
                .controller
                .poll_timeout(now, IDLE_POLL)
                .min(deadline.saturating_duration_since(now));
            self.controller.wait_for_completion(wait, Instant::now);
            self.controller.tick(Instant::now());
        }
        true
    }
}
