pub mod execution;
pub mod executor;

pub use execution::{CancelToken, SubmissionCompletion, SubmissionInvocation};
pub use executor::TaskExecutor;
