//! Update check definitions.
//!
//! A check is a shell command that prints available updates, one per line.
//! See [`CheckDefinition`] for the fields and [`Timeout`] for how run time
//! limits are written.

pub mod definition;
pub mod timeout;

pub use definition::CheckDefinition;
pub use timeout::{parse_timeout, Timeout};
