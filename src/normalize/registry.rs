//! Post-processor registry.
//!
//! A post-processor rewrites the stdout lines of one kind of check, e.g.
//! hoisting a column header or dropping rows that are not really updates.
//! Checks select one with `kind:`; a description alias keeps older
//! configuration files working without it.

use std::collections::HashMap;

use super::outdated::OutdatedTable;

/// Stdout of a check after post-processing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Processed {
    pub header: Option<String>,
    pub stdout: Vec<String>,
}

/// Rewrites the (trimmed, non-empty) stdout lines of a check.
pub trait PostProcessor: Send + Sync {
    /// Kind name used in check definitions.
    fn kind(&self) -> &str;

    /// Process stdout lines. Malformed lines are dropped, never fatal.
    fn process(&self, stdout: Vec<String>) -> Processed;
}

/// Registry of post-processors keyed by kind.
pub struct PostProcessorRegistry {
    processors: HashMap<String, Box<dyn PostProcessor>>,
    aliases: HashMap<String, String>,
}

impl PostProcessorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            processors: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Create a registry with the built-in post-processors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(OutdatedTable));
        registry.alias("Node.js modules", OutdatedTable::KIND);
        registry
    }

    /// Register a post-processor under its kind.
    pub fn register(&mut self, processor: Box<dyn PostProcessor>) {
        self.processors
            .insert(processor.kind().to_string(), processor);
    }

    /// Select `kind` for checks with this description and no explicit kind.
    pub fn alias(&mut self, description: impl Into<String>, kind: impl Into<String>) {
        self.aliases.insert(description.into(), kind.into());
    }

    /// Get a post-processor by kind.
    pub fn get(&self, kind: &str) -> Option<&dyn PostProcessor> {
        self.processors.get(kind).map(|p| p.as_ref())
    }

    /// Find the post-processor for a check.
    ///
    /// An explicit kind wins; otherwise the description alias is used.
    pub fn resolve(&self, kind: Option<&str>, description: &str) -> Option<&dyn PostProcessor> {
        match kind {
            Some(kind) => {
                let processor = self.get(kind);
                if processor.is_none() {
                    tracing::warn!("unknown check kind '{}' for '{}'", kind, description);
                }
                processor
            }
            None => self
                .aliases
                .get(description)
                .and_then(|kind| self.get(kind)),
        }
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.processors.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Get the number of registered post-processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl Default for PostProcessorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
