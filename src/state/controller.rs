use crate::core::fields::{FieldName, FormFields};
use crate::core::payload::ContactPayload;
use crate::core::validation::{self, FormValidator};
use crate::runtime::event::FormEvent;
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use crate::sink::SubmissionSink;
use crate::state::submission::{SubmissionState, SubmitOutcome};
use crate::state::validation::ValidationErrors;
use crate::task::{CancelToken, SubmissionCompletion, SubmissionInvocation, TaskExecutor};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);
pub const SINK_TIMEOUT: Duration = Duration::from_secs(10);

const REVERT_KEY: &str = "contact.success_revert";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// How long `Success` is shown before the form returns to `Idle`.
    pub success_display: Duration,
    pub sink_timeout: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            success_display: SUCCESS_DISPLAY,
            sink_timeout: SINK_TIMEOUT,
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub errors: ValidationErrors,
    pub submission: SubmissionState,
}

/// One contact-form session: field values, inline errors and the
/// submission lifecycle.
///
/// Everything runs on the caller's thread except the sink call, which goes to
/// a worker. Completions and timers are applied by [`tick`](Self::tick), so a
/// UI loop should call it whenever it wakes up.
pub struct ContactFormController {
    fields: FormFields,
    errors: ValidationErrors,
    state: SubmissionState,
    sink: Arc<dyn SubmissionSink>,
    form_validators: Vec<FormValidator>,
    options: ControllerOptions,
    scheduler: Scheduler,
    executor: TaskExecutor,
    in_flight: Option<CancelToken>,
    run_sequence: u64,
}

impl ContactFormController {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self::with_options(sink, ControllerOptions::default())
    }

    pub fn with_options(sink: Arc<dyn SubmissionSink>, options: ControllerOptions) -> Self {
        Self {
            fields: FormFields::default(),
            errors: ValidationErrors::default(),
            state: SubmissionState::Idle,
            sink,
            form_validators: validation::form_validators(),
            options,
            scheduler: Scheduler::new(),
            executor: TaskExecutor::new(),
            in_flight: None,
            run_sequence: 0,
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            submission: self.state.clone(),
        }
    }

    pub fn update_field(&mut self, field: FieldName, value: impl Into<String>) {
        self.fields.set(field, value);
        self.errors.clear_error(field);
    }

    pub fn validate_field(field: FieldName, value: &str) -> Result<(), String> {
        validation::validate_field(field, value)
    }

    pub fn on_field_blur(&mut self, field: FieldName, value: &str) {
        if let Err(error) = Self::validate_field(field, value) {
            debug!(field = %field, %error, "field failed validation on blur");
            self.errors.set_error(field, error);
        }
    }

    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        if self.state.is_submitting() {
            warn!("submission already in flight; ignoring submit");
            return SubmitOutcome::Rejected;
        }

        let failures = validation::validate_for_submit(&self.fields, &self.form_validators);
        if !failures.is_empty() {
            let count = failures.len();
            debug!(errors = count, "submission blocked by validation");
            self.errors.replace_all(failures);
            return SubmitOutcome::Invalid { errors: count };
        }
        self.errors.clear();

        self.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: REVERT_KEY.to_string(),
            },
            now,
        );

        self.run_sequence = self.run_sequence.saturating_add(1);
        let run_id = self.run_sequence;
        let cancel_token = CancelToken::new();
        self.in_flight = Some(cancel_token.clone());
        self.state = SubmissionState::Submitting;

        info!(run_id, sink = self.sink.name(), "dispatching contact submission");
        self.executor.spawn(SubmissionInvocation {
            run_id,
            payload: ContactPayload::from_fields(&self.fields),
            sink: Arc::clone(&self.sink),
            cancel_token,
            timeout: self.options.sink_timeout,
        });

        SubmitOutcome::Dispatched { run_id }
    }

    /// Applies finished sink calls and due timers. Returns whether anything
    /// observable changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for completion in self.executor.drain_ready() {
            self.apply_completion(completion, now);
            changed = true;
        }
        for event in self.scheduler.drain_ready(now) {
            changed |= self.apply_event(event);
        }
        changed
    }

    /// Blocks up to `timeout` for the in-flight sink call to finish and
    /// applies it at the instant `clock` reports once the result is in.
    /// Returns whether the submission settled.
    pub fn wait_for_completion(
        &mut self,
        timeout: Duration,
        mut clock: impl FnMut() -> Instant,
    ) -> bool {
        if !self.state.is_submitting() {
            return false;
        }
        let deadline = Instant::now() + timeout;
        while self.state.is_submitting() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.executor.wait_next(remaining) {
                Some(completion) => {
                    let now = clock();
                    self.apply_completion(completion, now);
                }
                None => break,
            }
        }
        !self.state.is_submitting()
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn revert_pending(&self) -> bool {
        self.scheduler.is_pending(REVERT_KEY)
    }

    // At most one run is in flight, so every completion belongs to it.
    fn apply_completion(&mut self, completion: SubmissionCompletion, now: Instant) {
        self.in_flight = None;

        match completion.result {
            Ok(()) => {
                info!(
                    run_id = completion.run_id,
                    sink = %completion.sink,
                    "contact submission accepted"
                );
                self.state = SubmissionState::Success;
                self.fields.reset();
                self.errors.clear();
                self.scheduler.schedule(
                    SchedulerCommand::EmitAfter {
                        key: REVERT_KEY.to_string(),
                        delay: self.options.success_display,
                        event: FormEvent::RevertToIdle,
                    },
                    now,
                );
            }
            Err(err) => {
                warn!(
                    run_id = completion.run_id,
                    sink = %completion.sink,
                    error = %err,
                    "contact submission failed"
                );
                let reason = err.user_message();
                self.errors.set_error(FieldName::Message, reason.clone());
                self.state = SubmissionState::Failed(reason);
            }
        }
    }

    fn apply_event(&mut self, event: FormEvent) -> bool {
        match event {
            FormEvent::RevertToIdle => {
                if self.state != SubmissionState::Success {
                    return false;
                }
                debug!("success window elapsed; form back to idle");
                self.state = SubmissionState::Idle;
                true
            }
        }
    }
}

impl Drop for ContactFormController {
    fn drop(&mut self) {
        if let Some(cancel_token) = self.in_flight.take() {
            cancel_token.cancel();
        }
    }
}
