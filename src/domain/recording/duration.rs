//! Recording bound value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DurationParseError;

/// Default longest allowed recording (5 seconds)
pub const DEFAULT_LIMIT_SECS: u64 = 5;

/// Value object representing a recording time bound.
/// Whole-second resolution, immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self { seconds: secs }
    }

    /// Default recording bound (5 seconds)
    pub const fn default_limit() -> Self {
        Self::from_secs(DEFAULT_LIMIT_SECS)
    }

    /// Get duration in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_secs(self.seconds)
    }
}

impl FromStr for Duration {
    type Err = DurationParseError;

    /// Parse a duration string into a Duration value object.
    /// Supported formats: "30s", "1m", "2m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let err = || DurationParseError {
            input: s.to_string(),
        };

        let (minutes, seconds): (u64, u64) = if let Some(rest) = input.strip_suffix('s') {
            match rest.split_once('m') {
                Some((m, sec)) => (
                    m.parse().map_err(|_| err())?,
                    sec.parse().map_err(|_| err())?,
                ),
                None => (0, rest.parse().map_err(|_| err())?),
            }
        } else if let Some(m) = input.strip_suffix('m') {
            (m.parse().map_err(|_| err())?, 0)
        } else {
            return Err(err());
        };

        let total = minutes * 60 + seconds;
        if total == 0 {
            return Err(err());
        }

        Ok(Self { seconds: total })
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.seconds / 60;
        let seconds = self.seconds % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::default_limit()
    }
}
