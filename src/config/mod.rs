//! Configuration loading.
//!
//! - [`paths`] - Configuration directory layout
//! - [`loader`] - Check definitions (`updates.yaml`)

pub mod loader;
pub mod paths;

pub use loader::{load_checks, parse_checks};
pub use paths::{default_config_dir, AppPaths, PROGRAM};
