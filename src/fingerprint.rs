//! Check-list fingerprints.
//!
//! The cache is keyed by a digest of the check definitions, so editing
//! `updates.yaml` (content or order) starts a fresh baseline instead of
//! diffing against results of a different check list.
//!
//! Values are first reduced to a [`Canonical`] tree in which mapping entries
//! are sorted by key while sequence order is preserved, then the tree's JSON
//! encoding is hashed with SHA-256.

use serde::Serialize;
use serde_yaml::Value;
use sha2::{Digest, Sha256};

use crate::error::{Result, UpdateWatchError};

/// Order-normalized form of a YAML value tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Canonical {
    Null,
    Bool(bool),
    Number(String),
    String(String),
    Sequence(Vec<Canonical>),
    /// Entries sorted by key.
    Mapping(Vec<(Canonical, Canonical)>),
}

impl Canonical {
    fn is_primitive(&self) -> bool {
        !matches!(self, Canonical::Sequence(_) | Canonical::Mapping(_))
    }
}

/// Reduce a value to its canonical form.
///
/// Fails with [`UpdateWatchError::UnhashableInput`] for tagged values and
/// for mapping keys that are not scalars.
pub fn canonicalize(value: &Value) -> Result<Canonical> {
    match value {
        Value::Null => Ok(Canonical::Null),
        Value::Bool(b) => Ok(Canonical::Bool(*b)),
        Value::Number(n) => Ok(Canonical::Number(n.to_string())),
        Value::String(s) => Ok(Canonical::String(s.clone())),
        Value::Sequence(items) => items
            .iter()
            .map(canonicalize)
            .collect::<Result<Vec<_>>>()
            .map(Canonical::Sequence),
        Value::Mapping(map) => {
            let mut entries = map
                .iter()
                .map(|(k, v)| {
                    let key = canonicalize(k)?;
                    if !key.is_primitive() {
                        return Err(UpdateWatchError::UnhashableInput {
                            message: "mapping keys must be scalars".to_string(),
                        });
                    }
                    Ok((key, canonicalize(v)?))
                })
                .collect::<Result<Vec<_>>>()?;
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Ok(Canonical::Mapping(entries))
        }
        Value::Tagged(tagged) => Err(UpdateWatchError::UnhashableInput {
            message: format!("unsupported tagged value {}", tagged.tag),
        }),
    }
}

/// Hex-encoded SHA-256 digest of a value's canonical form.
pub fn fingerprint(value: &Value) -> Result<String> {
    let canonical = canonicalize(value)?;
    let encoded = serde_json::to_vec(&canonical).map_err(anyhow::Error::from)?;
    let digest = Sha256::digest(&encoded);
    Ok(hex::encode(&digest[..]))
}

/// Fingerprint any serializable value (e.g. a list of check definitions).
pub fn fingerprint_of<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let value = serde_yaml::to_value(value).map_err(|e| UpdateWatchError::UnhashableInput {
        message: e.to_string(),
    })?;
    fingerprint(&value)
}
