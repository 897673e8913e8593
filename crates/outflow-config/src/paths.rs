//! Folder-path mapping with star-template resolution.
//!
//! The path-mapping file assigns a folder to each role key the pipeline
//! needs (`dradio=Data/Molecular/$star_name$` and so on). Values are plain
//! strings; no filesystem existence or permission checks happen here, that
//! is the embedding workflow's job.

use crate::dialect::DialectSpec;
use crate::document::ConfigDocument;
use indexmap::IndexMap;
use outflow_common::{Error, Result, StarName};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Literal placeholder substituted with a star name during resolution.
pub const STAR_TOKEN: &str = "$star_name$";

/// Semantic role of a path entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathRole {
    /// Read-only input data under the toolkit home.
    Data,
    /// Results written by the pipeline.
    Output,
    /// Working space handed to the external codes; must be writable.
    Scratch,
}

impl PathRole {
    /// Whether the role requires write permission.
    pub fn writable(&self) -> bool {
        matches!(self, PathRole::Output | PathRole::Scratch)
    }
}

/// One keyed folder path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEntry {
    /// Raw value as stored in the mapping file; may contain [`STAR_TOKEN`].
    pub raw: String,
    pub role: PathRole,
    /// Whether the entry expects a per-star subfolder.
    pub per_star: bool,
}

/// Keyed list of folder roles used to locate external-tool inputs and
/// outputs.
///
/// Entries keep the order of the mapping file. Every entry starts with
/// [`PathRole::Data`]; callers tag output and scratch roles explicitly
/// via [`PathMap::set_role`].
#[derive(Debug, Clone)]
pub struct PathMap {
    entries: IndexMap<String, PathEntry>,
}

impl PathMap {
    /// Build a path map from an already-parsed document.
    pub fn from_document(doc: &ConfigDocument) -> Self {
        let mut entries = IndexMap::new();
        for key in doc.keys() {
            let raw = doc.get_or(key, "").to_string();
            let per_star = raw.contains(STAR_TOKEN);
            entries.insert(
                key.to_string(),
                PathEntry {
                    raw,
                    role: PathRole::Data,
                    per_star,
                },
            );
        }
        PathMap { entries }
    }

    /// Parse a path-mapping file from in-memory text.
    pub fn parse(source: &str) -> Result<Self> {
        let doc = ConfigDocument::parse(source, DialectSpec::path_mapping())?;
        Ok(Self::from_document(&doc))
    }

    /// Read and parse a path-mapping file.
    pub fn load(path: &Path) -> Result<Self> {
        let doc = ConfigDocument::load(path, DialectSpec::path_mapping())?;
        Ok(Self::from_document(&doc))
    }

    /// Look up an entry.
    pub fn entry(&self, key: &str) -> Result<&PathEntry> {
        self.entries.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_string(),
        })
    }

    /// Tag an entry with a semantic role.
    pub fn set_role(&mut self, key: &str, role: PathRole) -> Result<()> {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.role = role;
                Ok(())
            }
            None => Err(Error::MissingKey {
                key: key.to_string(),
            }),
        }
    }

    /// Resolve an entry that must not contain a star template.
    pub fn resolve(&self, key: &str) -> Result<String> {
        let entry = self.entry(key)?;
        if entry.raw.contains(STAR_TOKEN) {
            return Err(Error::Template {
                key: key.to_string(),
                message: "value contains $star_name$ but no star name was supplied".to_string(),
            });
        }
        if entry.raw.is_empty() {
            return Err(Error::Template {
                key: key.to_string(),
                message: "resolved path is empty".to_string(),
            });
        }
        Ok(entry.raw.clone())
    }

    /// Resolve an entry, substituting every [`STAR_TOKEN`] with the star
    /// name. Entries without the token resolve as-is.
    pub fn resolve_for_star(&self, key: &str, star: &StarName) -> Result<String> {
        let entry = self.entry(key)?;
        let resolved = entry.raw.replace(STAR_TOKEN, star.as_str());
        if resolved.is_empty() {
            return Err(Error::Template {
                key: key.to_string(),
                message: "resolved path is empty".to_string(),
            });
        }
        Ok(resolved)
    }

    /// Validate that every listed key is present with a non-empty value.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            let entry = self.entry(key)?;
            if entry.raw.is_empty() {
                return Err(Error::Template {
                    key: key.to_string(),
                    message: "required path is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
