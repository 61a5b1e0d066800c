//! Semantic version comparison for outdated-package reports.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed version such as `1.2.3`, `v2.0` or `3.0.0-beta.2`.
///
/// Missing trailing components compare as zero (`1.2 == 1.2.0`). A version
/// with pre-release identifiers sorts before the same version without them.
/// Build metadata (`+...`) is ignored.
#[derive(Debug, Clone)]
pub struct Version {
    core: Vec<u64>,
    pre: Vec<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Identifier {
    Numeric(u64),
    Alpha(String),
}

/// Error returned for strings that are not versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidVersion(pub String);

impl fmt::Display for InvalidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid version: {}", self.0)
    }
}

impl std::error::Error for InvalidVersion {}

impl FromStr for Version {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidVersion(s.to_string());

        let text = s.trim();
        let text = text.strip_prefix('v').unwrap_or(text);
        let text = text.split('+').next().unwrap_or_default();

        let (core, pre) = match text.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (text, None),
        };

        let core = core
            .split('.')
            .map(|part| part.parse::<u64>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match pre {
            Some(pre) => pre
                .split('.')
                .map(|part| {
                    if part.is_empty() {
                        Err(invalid())
                    } else if part.bytes().all(|b| b.is_ascii_digit()) {
                        part.parse().map(Identifier::Numeric).map_err(|_| invalid())
                    } else {
                        Ok(Identifier::Alpha(part.to_string()))
                    }
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self { core, pre })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.core.len().max(other.core.len());
        for i in 0..len {
            let a = self.core.get(i).copied().unwrap_or(0);
            let b = other.core.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        match (self.pre.is_empty(), other.pre.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.pre.cmp(&other.pre),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

/// Whether `current` is strictly older than `wanted`.
///
/// `None` when either side is not a version.
pub fn is_outdated(current: &str, wanted: &str) -> Option<bool> {
    let current: Version = current.parse().ok()?;
    let wanted: Version = wanted.parse().ok()?;
    Some(current < wanted)
}
