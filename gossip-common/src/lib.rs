//! Common types and utilities shared across the gossip crates.
//!
//! This crate holds the vocabulary every other crate speaks: the
//! [`TimeOfDay`] fetch bucket, the shared [`GossipError`] and [`Result`]
//! alias, and the [`observability`] helpers binaries call once at start-up.
//! It stays light so that the store, the HTTP client and the app can all
//! depend on it.
//!
//! # Examples
//!
//! ```rust
//! use gossip_common::TimeOfDay;
//!
//! assert_eq!(TimeOfDay::from_hour(9), TimeOfDay::Am);
//! assert_eq!("PM".parse::<TimeOfDay>().unwrap(), TimeOfDay::Pm);
//! assert_eq!(TimeOfDay::Pm.to_string(), "pm");
//! ```
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

pub mod observability;

/// Coarse half-day bucket used to tell the two daily fetches apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Am,
    Pm,
}

impl TimeOfDay {
    /// Both buckets, latest first.
    pub const LATEST_FIRST: [TimeOfDay; 2] = [TimeOfDay::Pm, TimeOfDay::Am];

    /// Hours `0..12` are morning, everything else afternoon.
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 { Self::Am } else { Self::Pm }
    }

    /// Bucket of any chrono value that carries a wall-clock time.
    pub fn of<T: Timelike>(at: &T) -> Self {
        Self::from_hour(at.hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "am",
            Self::Pm => "pm",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is neither `am` nor `pm`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("expected `am` or `pm`, got `{0}`")]
pub struct ParseTimeOfDayError(String);

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" => Ok(Self::Am),
            "pm" => Ok(Self::Pm),
            _ => Err(ParseTimeOfDayError(s.to_string())),
        }
    }
}

/// Error types used across the gossip workspace.
#[derive(thiserror::Error, Debug)]
pub enum GossipError {
    /// Nothing stored for the requested bucket and no live fallback applies.
    #[error("no gossip found for {date}{}", .tod.map(|t| format!(" ({t})")).unwrap_or_default())]
    NotFound {
        date: NaiveDate,
        tod: Option<TimeOfDay>,
    },

    /// The remote page could not be retrieved or answered with a failure status.
    #[error("upstream fetch failed: {0}")]
    UpstreamFetch(String),

    /// Configuration was incomplete or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the raw store failed.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A year/month/day combination that is not a calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// The stored page did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenient alias for results that use [`GossipError`].
pub type Result<T> = std::result::Result<T, GossipError>;
