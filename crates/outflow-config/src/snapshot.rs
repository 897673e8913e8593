//! Run-provenance snapshots.
//!
//! A snapshot records which configuration went into one modeling run: the
//! digest of every source document, the resolved path roles, and the
//! environment it was captured on. Written next to a run's output, it lets
//! a result be traced back to its exact inputs long after the original
//! files have been edited.

use outflow_common::schema::{self, SNAPSHOT_SCHEMA_VERSION};
use outflow_common::{Error, Result, RunId, StarName};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// SHA-256 digest of raw bytes, hex-encoded.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Digest of one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDigest {
    /// Label, conventionally the file name (`Path.dat`, `Telescope_Data.dat`).
    pub label: String,
    pub sha256: String,
}

/// Complete provenance record for one run's configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// Schema version for compatibility checking.
    pub schema_version: String,

    /// The run this snapshot belongs to.
    pub run_id: RunId,

    /// ISO-8601 capture time.
    pub created_at: String,

    /// Capture host, when it could be determined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Star the run models, when the run is star-specific.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_name: Option<StarName>,

    /// Digests of every source document, in capture order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceDigest>,

    /// Resolved path roles, key to resolved value.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resolved_paths: BTreeMap<String, String>,
}

impl ConfigSnapshot {
    /// Start a snapshot for a run.
    pub fn capture(run_id: RunId, star_name: Option<&StarName>) -> Self {
        ConfigSnapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            run_id,
            created_at: chrono::Utc::now().to_rfc3339(),
            hostname: hostname::get().ok().and_then(|h| h.into_string().ok()),
            star_name: star_name.cloned(),
            sources: Vec::new(),
            resolved_paths: BTreeMap::new(),
        }
    }

    /// Record a source document's digest.
    pub fn add_source(&mut self, label: impl Into<String>, contents: &[u8]) {
        self.sources.push(SourceDigest {
            label: label.into(),
            sha256: sha256_hex(contents),
        });
    }

    /// Record one resolved path role.
    pub fn record_path(&mut self, key: impl Into<String>, resolved: impl Into<String>) {
        self.resolved_paths.insert(key.into(), resolved.into());
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot, rejecting incompatible schema versions.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: ConfigSnapshot = serde_json::from_str(json)?;
        if !schema::is_compatible(&snapshot.schema_version) {
            return Err(Error::IncompatibleSchema {
                found: snapshot.schema_version,
                expected: SNAPSHOT_SCHEMA_VERSION.to_string(),
            });
        }
        Ok(snapshot)
    }

    /// Save the snapshot to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
