//! Check timeouts.
//!
//! Timeouts are written the way GNU `timeout(1)` accepts them: a decimal
//! number with an optional `s`, `m`, `h` or `d` suffix (seconds when the
//! suffix is omitted). A zero timeout disables the limit, as it does for
//! `timeout(1)`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, UpdateWatchError};

/// Maximum run time of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timeout(Duration);

impl Timeout {
    /// Timeout used when a check does not declare one (3 minutes).
    pub const DEFAULT: Timeout = Timeout(Duration::from_secs(180));

    /// Create a timeout from a duration.
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    /// The timeout as a duration.
    pub fn as_duration(&self) -> Duration {
        self.0
    }

    /// Argument passed to `timeout(1)`.
    pub fn to_arg(&self) -> String {
        self.to_string()
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.as_secs_f64())
    }
}

impl FromStr for Timeout {
    type Err = UpdateWatchError;

    fn from_str(s: &str) -> Result<Self> {
        parse_timeout(s).map(Self)
    }
}

/// Parse a timeout string like "0.1s", "30", "3m" or "1h".
pub fn parse_timeout(value: &str) -> Result<Duration> {
    let invalid = || UpdateWatchError::InvalidTimeout {
        value: value.to_string(),
    };

    let text = value.trim().to_lowercase();

    let (number, multiplier) = if let Some(days) = text.strip_suffix('d') {
        (days, 86_400.0)
    } else if let Some(hours) = text.strip_suffix('h') {
        (hours, 3_600.0)
    } else if let Some(mins) = text.strip_suffix('m') {
        (mins, 60.0)
    } else if let Some(secs) = text.strip_suffix('s') {
        (secs, 1.0)
    } else {
        (text.as_str(), 1.0)
    };

    let n: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !n.is_finite() || n < 0.0 {
        return Err(invalid());
    }

    let duration = Duration::try_from_secs_f64(n * multiplier).map_err(|_| invalid())?;
    // Zero means "no limit"; a positive value must not round down to it.
    if n > 0.0 && duration.is_zero() {
        return Err(invalid());
    }

    Ok(duration)
}

impl Serialize for Timeout {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timeout {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(f64),
            Text(String),
        }

        let text = match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => secs.to_string(),
            Raw::Text(text) => text,
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}
