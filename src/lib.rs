//! updatewatch - Watch for available software updates.
//!
//! updatewatch runs a list of user-defined shell checks (package managers
//! asked "what can be upgraded?"), normalizes their output into lists of
//! update items and remembers each run, so that only genuinely new items
//! are reported.
//!
//! # Modules
//!
//! - [`cache`] - Result cache and reconciliation with the previous run
//! - [`checks`] - Check definitions and timeouts
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration directory and check loading
//! - [`error`] - Error types and result aliases
//! - [`fingerprint`] - Content fingerprints of check lists
//! - [`normalize`] - Turning raw check output into results
//! - [`report`] - Terminal output
//! - [`shell`] - Concurrent check execution
//! - [`watch`] - Pipeline orchestration
//!
//! # Example
//!
//! ```
//! use updatewatch::cache::reconcile;
//! use updatewatch::normalize::Normalizer;
//!
//! let current = Normalizer::default().normalize("apt", "pkgA\npkgB\n", "", 0, None);
//! let previous = Normalizer::default().normalize("apt", "pkgA\n", "", 0, None);
//!
//! let merged = reconcile(vec![current], vec![previous]);
//! assert!(merged[0].is_new("pkgB"));
//! assert!(!merged[0].is_new("pkgA"));
//! ```

pub mod cache;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod report;
pub mod shell;
pub mod watch;

pub use error::{Result, UpdateWatchError};
