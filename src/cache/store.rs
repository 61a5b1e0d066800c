//! Cache storage implementation.
//!
//! One JSON document per check-list fingerprint, written with the
//! write-to-temp-then-rename pattern so an interrupted run never leaves a
//! partially written entry behind. A single writer is assumed.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::Span;

use super::entry::CacheEntry;
use crate::normalize::CheckResult;

/// Storage for the results of previous runs.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Root directory for cache.
    root: PathBuf,
    span: Span,
}

impl CacheStore {
    /// Create a new cache store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            span: Span::none(),
        }
    }

    /// Attach the span that store events are recorded in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }

    /// Get the path of the entry for a key.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Load the entry for a key.
    pub fn load(&self, key: &str) -> Result<Option<CacheEntry>> {
        check_key(key)?;
        let path = self.entry_path(key);

        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read cache entry {:?}", path))
            }
        };

        let entry: CacheEntry = serde_json::from_str(&json)
            .with_context(|| format!("Corrupt cache entry {:?}", path))?;

        Ok(Some(entry))
    }

    /// Previous results for a key.
    ///
    /// A missing, unreadable or corrupt entry is an empty baseline.
    pub fn get(&self, key: &str) -> Vec<CheckResult> {
        let _enter = self.span.enter();

        match self.load(key) {
            Ok(Some(entry)) => {
                tracing::debug!("loaded {} cached results for {}", entry.results.len(), key);
                entry.results
            }
            Ok(None) => {
                tracing::debug!("no cache entry for {}", key);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("ignoring cache entry: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Replace the entry for a key.
    pub fn put(&self, key: &str, results: Vec<CheckResult>) -> Result<CacheEntry> {
        let _enter = self.span.enter();
        check_key(key)?;
        self.ensure_dir()?;

        let entry = CacheEntry::new(key, results);
        let path = self.entry_path(key);
        let json = serde_json::to_string_pretty(&entry)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write cache entry {:?}", temp_path))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace cache entry {:?}", path))?;

        tracing::debug!("wrote {} results for {}", entry.results.len(), key);

        Ok(entry)
    }

    /// Keys of all stored entries, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();

        let dir = match fs::read_dir(&self.root) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e.into()),
        };

        for entry in dir {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if check_key(stem).is_err() {
                        continue;
                    }
                    keys.push(stem.to_string());
                }
            }
        }

        keys.sort();
        Ok(keys)
    }

    /// List all readable entries, most recently updated first.
    pub fn list(&self) -> Result<Vec<CacheEntry>> {
        let mut entries = Vec::new();

        for key in self.keys()? {
            if let Ok(Some(entry)) = self.load(&key) {
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }

    /// Remove the entry for a key.
    pub fn remove(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        let path = self.entry_path(key);

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove every entry, corrupt ones included.
    pub fn clear(&self) -> Result<usize> {
        let mut removed = 0;

        for key in self.keys()? {
            if self.remove(&key)? {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("Invalid cache key {:?}", key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result(description: &str, stdout: &[&str]) -> CheckResult {
        CheckResult {
            stdout: stdout.iter().map(|s| s.to_string()).collect(),
            ..CheckResult::new(description)
        }
    }

    #[test]
    fn cache_store_creation() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        assert_eq!(store.root(), temp.path());
    }

    #[test]
    fn put_and_get() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        let results = vec![result("a", &["pkgA"]), result("b", &["pkgB"])];

        store.put("abc123", results.clone()).unwrap();

        assert_eq!(store.get("abc123"), results);
    }

    #[test]
    fn get_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        assert!(store.get("abc123").is_empty());
        assert!(store.load("abc123").unwrap().is_none());
    }

    #[test]
    fn get_corrupt_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        fs::write(store.entry_path("abc123"), "{not json").unwrap();

        assert!(store.get("abc123").is_empty());
        assert!(store.load("abc123").is_err());
    }

    #[test]
    fn put_overwrites_in_full() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        store
            .put("abc123", vec![result("a", &["x"]), result("b", &["y"])])
            .unwrap();
        store.put("abc123", vec![result("a", &["z"])]).unwrap();

        assert_eq!(store.get("abc123"), vec![result("a", &["z"])]);
    }

    #[test]
    fn put_creates_root_and_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("nested").join("cache"));

        store.put("abc123", vec![]).unwrap();

        assert!(store.entry_path("abc123").exists());
        assert!(!store.entry_path("abc123").with_extension("json.tmp").exists());
    }

    #[test]
    fn invalid_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        assert!(store.put("../escape", vec![]).is_err());
        assert!(store.put("", vec![]).is_err());
        assert!(store.remove("a/b").is_err());
    }

    #[test]
    fn keys_and_list() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());

        store.put("bbb", vec![result("b", &["y"])]).unwrap();
        store.put("aaa", vec![result("a", &["x"])]).unwrap();

        assert_eq!(store.keys().unwrap(), vec!["aaa", "bbb"]);

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].updated_at >= entries[1].updated_at);
    }

    #[test]
    fn keys_of_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path().join("missing"));

        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn remove_entry() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        store.put("abc123", vec![]).unwrap();

        assert!(store.remove("abc123").unwrap());
        assert!(!store.remove("abc123").unwrap());
        assert!(store.load("abc123").unwrap().is_none());
    }

    #[test]
    fn clear_cache() {
        let temp = TempDir::new().unwrap();
        let store = CacheStore::new(temp.path());
        store.put("aaa", vec![]).unwrap();
        store.put("bbb", vec![]).unwrap();
        fs::write(store.entry_path("ccc"), "garbage").unwrap();

        assert_eq!(store.clear().unwrap(), 3);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn entry_path_is_deterministic() {
        let store = CacheStore::new("/tmp/cache");

        assert_eq!(store.entry_path("abc"), store.entry_path("abc"));
        assert_ne!(store.entry_path("abc"), store.entry_path("abd"));
    }
}
