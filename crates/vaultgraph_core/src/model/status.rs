//! Closed status enums for vault entities.
//!
//! # Responsibility
//! - Canonicalize user-authored status strings exactly once at the boundary.
//! - Provide the kebab-case external form used by every output mode.
//!
//! # Invariants
//! - Parsing ignores case, `-`, `_` and spaces (`In Progress` == `in-progress`).
//! - `as_str()` is the only external spelling ever produced.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error for status strings that match no known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusParseError {
    /// Entity kind the status was parsed for (`task|project|area`).
    pub kind: &'static str,
    /// Raw input as supplied by the caller.
    pub value: String,
}

impl Display for StatusParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} status `{}`", self.kind, self.value)
    }
}

impl Error for StatusParseError {}

fn status_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Implements the string boundary shared by every status enum.
macro_rules! status_boundary {
    ($ty:ident, $kind:literal) => {
        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(D::Error::custom)
            }
        }

        impl FromStr for $ty {
            type Err = StatusParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let key = status_key(value);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|status| status_key(status.as_str()) == key)
                    .ok_or_else(|| StatusParseError {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }
    };
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskStatus {
    Inbox,
    Icebox,
    Ready,
    InProgress,
    Blocked,
    Dropped,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 7] = [
        Self::Inbox,
        Self::Icebox,
        Self::Ready,
        Self::InProgress,
        Self::Blocked,
        Self::Dropped,
        Self::Done,
    ];

    /// Canonical external spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Icebox => "icebox",
            Self::Ready => "ready",
            Self::InProgress => "in-progress",
            Self::Blocked => "blocked",
            Self::Dropped => "dropped",
            Self::Done => "done",
        }
    }

    /// Decoration used by tree outlines.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Inbox => "📥",
            Self::Icebox => "🧊",
            Self::Ready => "📋",
            Self::InProgress => "🔄",
            Self::Blocked => "🚫",
            Self::Dropped => "🗑️",
            Self::Done => "✅",
        }
    }

    /// Statuses hidden from default views regardless of dates.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Done | Self::Dropped | Self::Icebox)
    }
}

status_boundary!(TaskStatus, "task");

/// Project lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectStatus {
    Planning,
    Ready,
    Blocked,
    InProgress,
    Paused,
    Done,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 6] = [
        Self::Planning,
        Self::Ready,
        Self::Blocked,
        Self::InProgress,
        Self::Paused,
        Self::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Ready => "ready",
            Self::Blocked => "blocked",
            Self::InProgress => "in-progress",
            Self::Paused => "paused",
            Self::Done => "done",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Planning => "📝",
            Self::Ready => "📋",
            Self::Blocked => "🚫",
            Self::InProgress => "🔄",
            Self::Paused => "⏸️",
            Self::Done => "✅",
        }
    }
}

status_boundary!(ProjectStatus, "project");

/// Area lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AreaStatus {
    Active,
    Archived,
}

impl AreaStatus {
    pub const ALL: [AreaStatus; 2] = [Self::Active, Self::Archived];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

status_boundary!(AreaStatus, "area");
