//! Result cache.
//!
//! Results of the last run are stored per check-list fingerprint; the next
//! run is reconciled against them to find what is new.

pub mod entry;
pub mod reconcile;
pub mod store;

pub use entry::CacheEntry;
pub use reconcile::{difference, reconcile};
pub use store::CacheStore;
