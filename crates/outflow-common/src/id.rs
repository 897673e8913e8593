//! Core identifier types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A star name as it appears in catalog files and path templates,
/// e.g. `IRC+10216` or `o_cet`.
///
/// Names are stored verbatim (catalogs use `_` where a display name has a
/// space) and must be non-empty with no internal whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarName(String);

impl StarName {
    /// Parse a star name, returning None if empty or containing whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return None;
        }
        Some(StarName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Run identifier used to label one modeling run in provenance snapshots.
///
/// Format: `run-YYYYMMDD-HHMMSS-xxxxxx` where the suffix is random.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    /// Generate a new run ID from the current UTC time plus a random suffix.
    pub fn new() -> Self {
        let timestamp = chrono::Utc::now().format("%Y%m%d-%H%M%S");
        let random: String = uuid::Uuid::new_v4().to_string().chars().take(6).collect();
        RunId(format!("run-{}-{}", timestamp, random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
