//! Check process execution.

pub mod command;
pub mod platform;

pub use command::{
    CheckHandle, CheckRunner, RawOutput, RunnerOptions, SPAWN_FAILURE_STATUS, TIMEOUT_STATUS,
};
pub use platform::{exit_code, lower_priority};
