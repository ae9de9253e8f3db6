//! Projection tunables.
//!
//! Hosts deserialize this from their own config source; the engine never
//! loads files itself.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_RECENT_WINDOW_HOURS: u32 = 24;
const DEFAULT_RECENT_CEILING: usize = 20;
const DEFAULT_ARCHIVE_MARKER: &str = "archive";

/// Invalid projection option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    ZeroRecentWindow,
    ZeroRecentCeiling,
    BlankArchiveMarker,
}

impl Display for OptionsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroRecentWindow => write!(f, "recent_window_hours must be greater than zero"),
            Self::ZeroRecentCeiling => write!(f, "recent_ceiling must be greater than zero"),
            Self::BlankArchiveMarker => write!(f, "archive_markers must not contain blank values"),
        }
    }
}

impl Error for OptionsError {}

/// Options shared by every projection entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Width of the recently-modified window.
    pub recent_window_hours: u32,
    /// Recently-modified bucket is emptied when candidates exceed this.
    pub recent_ceiling: usize,
    /// Path components (case-insensitive) that mark archived tasks.
    pub archive_markers: Vec<String>,
    /// Treat every entity as active, bypassing default visibility.
    pub include_inactive: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            recent_window_hours: DEFAULT_RECENT_WINDOW_HOURS,
            recent_ceiling: DEFAULT_RECENT_CEILING,
            archive_markers: vec![DEFAULT_ARCHIVE_MARKER.to_string()],
            include_inactive: false,
        }
    }
}

impl ProjectionOptions {
    /// Validates option ranges.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.recent_window_hours == 0 {
            return Err(OptionsError::ZeroRecentWindow);
        }
        if self.recent_ceiling == 0 {
            return Err(OptionsError::ZeroRecentCeiling);
        }
        if self
            .archive_markers
            .iter()
            .any(|marker| marker.trim().is_empty())
        {
            return Err(OptionsError::BlankArchiveMarker);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{OptionsError, ProjectionOptions};

    #[test]
    fn defaults_are_valid() {
        let options = ProjectionOptions::default();
        assert_eq!(options.recent_window_hours, 24);
        assert_eq!(options.recent_ceiling, 20);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_marker() {
        let options = ProjectionOptions {
            archive_markers: vec!["  ".to_string()],
            ..ProjectionOptions::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::BlankArchiveMarker));
    }
}
