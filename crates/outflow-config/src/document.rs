//! Ordered `key=value` document parsing.
//!
//! A [`ConfigDocument`] is parsed once, held immutable for the duration of
//! a run, and shared freely for reads. Parsing is fail-fast: the first
//! malformed line aborts the load, and no partial document is ever
//! returned.

use crate::dialect::DialectSpec;
use indexmap::IndexMap;
use outflow_common::value::{self, CastResult};
use outflow_common::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Stored state for one key.
#[derive(Debug, Clone)]
struct Entry {
    /// All values seen for the key. Non-repeatable keys hold exactly one
    /// (the last write); repeatable keys hold every occurrence in order.
    values: Vec<String>,
    first_line: usize,
}

/// An ordered mapping parsed from one keyed text document.
///
/// Keys iterate in first-occurrence order. For non-repeatable keys a
/// duplicate overwrites the previous value (last write wins, with a
/// warning); keys in the dialect's repeatable set are collected as ordered
/// sequences instead.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    dialect: DialectSpec,
    entries: IndexMap<String, Entry>,
}

impl ConfigDocument {
    /// Parse a document from in-memory text.
    pub fn parse(source: &str, dialect: DialectSpec) -> Result<Self> {
        let mut entries: IndexMap<String, Entry> = IndexMap::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || dialect.is_full_line_comment(trimmed) {
                continue;
            }

            let Some((raw_key, raw_value)) = trimmed.split_once('=') else {
                return Err(Error::Parse {
                    line,
                    message: format!("expected key=value, got '{trimmed}'"),
                });
            };

            let key = raw_key.trim();
            if key.is_empty() {
                return Err(Error::Parse {
                    line,
                    message: "empty key before '='".to_string(),
                });
            }

            let value = dialect.strip_inline(raw_value).trim().to_string();
            let canon = dialect.canonical_key(key);

            if dialect.is_repeatable(&canon) {
                entries
                    .entry(canon)
                    .or_insert_with(|| Entry {
                        values: Vec::new(),
                        first_line: line,
                    })
                    .values
                    .push(value);
            } else if let Some(existing) = entries.get_mut(&canon) {
                warn!(
                    key = %canon,
                    first_line = existing.first_line,
                    line,
                    "duplicate key, last value wins"
                );
                existing.values.clear();
                existing.values.push(value);
            } else {
                entries.insert(
                    canon,
                    Entry {
                        values: vec![value],
                        first_line: line,
                    },
                );
            }
        }

        debug!(dialect = dialect.name(), keys = entries.len(), "parsed document");
        Ok(ConfigDocument { dialect, entries })
    }

    /// Read and parse a document from a file.
    pub fn load(path: &Path, dialect: DialectSpec) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source, dialect)
    }

    /// The dialect this document was parsed under.
    pub fn dialect(&self) -> &DialectSpec {
        &self.dialect
    }

    /// Look up a key. For repeatable keys this is the last occurrence;
    /// use [`ConfigDocument::values`] for the full sequence.
    pub fn get(&self, key: &str) -> Result<&str> {
        let canon = self.dialect.canonical_key(key);
        self.entries
            .get(&canon)
            .and_then(|entry| entry.values.last())
            .map(String::as_str)
            .ok_or(Error::MissingKey { key: canon })
    }

    /// Look up a key, falling back to `default` when absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Ok(v) => v,
            Err(_) => default,
        }
    }

    /// Look up a key and apply a caster to the raw value.
    pub fn get_parsed<T>(&self, key: &str, cast: impl FnOnce(&str) -> CastResult<T>) -> Result<T> {
        let raw = self.get(key)?;
        cast(raw).map_err(|e| Error::TypeCast {
            key: self.dialect.canonical_key(key),
            value: raw.to_string(),
            target: e.target,
            cause: e.cause,
        })
    }

    /// Look up a float (accepts Fortran `d`/`D` exponents).
    pub fn get_float(&self, key: &str) -> Result<f64> {
        self.get_parsed(key, value::float)
    }

    /// Look up an integer.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get_parsed(key, value::int)
    }

    /// Look up a boolean (`.true.` / `.false.` / `1` / `0`).
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_parsed(key, value::boolean)
    }

    /// Look up a bracketed comma list.
    pub fn get_list(&self, key: &str) -> Result<Vec<String>> {
        self.get_parsed(key, value::list)
    }

    /// All occurrences of a key in document order. Empty when absent.
    pub fn values(&self, key: &str) -> &[String] {
        let canon = self.dialect.canonical_key(key);
        self.entries
            .get(&canon)
            .map(|entry| entry.values.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&self.dialect.canonical_key(key))
    }

    /// Keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
