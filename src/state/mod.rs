pub mod controller;
pub mod submission;
pub mod validation;

pub use controller::{ContactFormController, ControllerOptions, FormSnapshot};
pub use submission::{SubmissionState, SubmitOutcome};
pub use validation::ValidationErrors;
