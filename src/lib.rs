pub mod config;
pub mod core;
pub mod runtime;
pub mod sink;
pub mod state;
pub mod task;
pub mod ui;

pub use crate::core::fields;
pub use crate::core::payload;
pub use crate::core::validation;
pub use crate::core::validators;

pub use runtime::command;
pub use runtime::scheduler;

pub use state::controller;
pub use state::submission;

pub use ui::animation;
pub use ui::profile;
