//! Telescope instrument constants.
//!
//! The telescope table carries the dish size and the absolute flux
//! uncertainty used in flux-calibration error propagation. Lookups are
//! exact and a miss is an error: silently defaulting a dish size would
//! poison every downstream calibration.

use indexmap::IndexMap;
use outflow_common::value;
use outflow_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

/// Physical constants for one telescope. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelescopeSpec {
    pub name: String,
    /// Dish diameter in meters.
    pub dish_size_m: f64,
    /// Absolute flux calibration uncertainty, fractional.
    pub abs_flux_error: f64,
}

/// Lookup table parsed from rows of `NAME SIZE ABS_ERR`.
///
/// The header line (`#TELESCOPE ...`) and any other `#` comment lines are
/// informational and skipped.
#[derive(Debug, Clone)]
pub struct TelescopeTable {
    specs: IndexMap<String, TelescopeSpec>,
}

impl TelescopeTable {
    /// Parse a table from in-memory text.
    pub fn parse(source: &str) -> Result<Self> {
        let mut specs = IndexMap::new();

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let tokens: Vec<&str> = trimmed.split_whitespace().collect();
            if tokens.len() != 3 {
                return Err(Error::RowShape {
                    context: format!("telescope table line {line}"),
                    expected: 3,
                    found: tokens.len(),
                });
            }

            let dish_size_m = float_cell(line, "SIZE", tokens[1])?;
            let abs_flux_error = float_cell(line, "ABS_ERR", tokens[2])?;
            let name = tokens[0].to_string();

            let replaced = specs.insert(
                name.clone(),
                TelescopeSpec {
                    name: name.clone(),
                    dish_size_m,
                    abs_flux_error,
                },
            );
            if replaced.is_some() {
                warn!(telescope = %name, line, "duplicate telescope row, last value wins");
            }
        }

        debug!(telescopes = specs.len(), "parsed telescope table");
        Ok(TelescopeTable { specs })
    }

    /// Read and parse a table from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// Case-sensitive exact lookup.
    pub fn lookup(&self, name: &str) -> Result<&TelescopeSpec> {
        self.specs.get(name).ok_or_else(|| Error::UnknownTelescope {
            name: name.to_string(),
        })
    }

    /// Telescope names in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn float_cell(line: usize, column: &str, raw: &str) -> Result<f64> {
    value::float(raw).map_err(|e| Error::TypeCast {
        key: format!("{column} (line {line})"),
        value: raw.to_string(),
        target: e.target,
        cause: e.cause,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TELESCOPE_DAT: &str = "\
#TELESCOPE SIZE ABS_ERR
APEX 12. 0.2
JCMT 15. 0.3
";

    #[test]
    fn test_lookup_known_telescope() {
        let table = TelescopeTable::parse(TELESCOPE_DAT).unwrap();
        let jcmt = table.lookup("JCMT").unwrap();
        assert_eq!(jcmt.dish_size_m, 15.0);
        assert_eq!(jcmt.abs_flux_error, 0.3);
    }

    #[test]
    fn test_lookup_miss_is_an_error() {
        let table = TelescopeTable::parse(TELESCOPE_DAT).unwrap();
        let err = table.lookup("VLA").unwrap_err();
        assert!(matches!(err, Error::UnknownTelescope { name } if name == "VLA"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = TelescopeTable::parse(TELESCOPE_DAT).unwrap();
        assert!(table.lookup("apex").is_err());
        assert!(table.lookup("APEX").is_ok());
    }

    #[test]
    fn test_names_keep_file_order() {
        let table = TelescopeTable::parse(TELESCOPE_DAT).unwrap();
        let names: Vec<&str> = table.names().collect();
        assert_eq!(names, vec!["APEX", "JCMT"]);
    }

    #[test]
    fn test_wrong_column_count() {
        let err = TelescopeTable::parse("#TELESCOPE SIZE ABS_ERR\nAPEX 12.\n").unwrap_err();
        match err {
            Error::RowShape {
                expected, found, ..
            } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected RowShape, got {other:?}"),
        }

        let err = TelescopeTable::parse("APEX 12. 0.2 extra\n").unwrap_err();
        assert!(matches!(err, Error::RowShape { found: 4, .. }));
    }

    #[test]
    fn test_bad_float_column() {
        let err = TelescopeTable::parse("APEX big 0.2\n").unwrap_err();
        match err {
            Error::TypeCast { key, value, .. } => {
                assert!(key.contains("SIZE"));
                assert_eq!(value, "big");
            }
            other => panic!("expected TypeCast, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_row_last_wins() {
        let table = TelescopeTable::parse("APEX 12. 0.2\nAPEX 12. 0.25\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("APEX").unwrap().abs_flux_error, 0.25);
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        let table = TelescopeTable::parse("\n# note\n#TELESCOPE SIZE ABS_ERR\n\nAPEX 12. 0.2\n")
            .unwrap();
        assert_eq!(table.len(), 1);
    }
}
