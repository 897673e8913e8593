//! Star catalog lookups.
//!
//! The star catalog is a keyword-column table with one row per star.
//! `STAR_NAME` is the key column; the catalog stores names with `_` where
//! a display name has a space, so `STAR_NAME_PLOTS` values are mapped back
//! for presentation.

use crate::columns::ColumnTable;
use outflow_common::value;
use outflow_common::{Error, Result};
use std::path::Path;

/// Key column every star catalog must carry.
pub const STAR_NAME_KEY: &str = "STAR_NAME";

/// Column holding the presentation name.
pub const PLOT_NAME_KEY: &str = "STAR_NAME_PLOTS";

/// A star catalog backed by a [`ColumnTable`]. Immutable after load.
#[derive(Debug, Clone)]
pub struct StarCatalog {
    table: ColumnTable,
    name_col: usize,
}

impl StarCatalog {
    /// Wrap an already-parsed table, requiring the `STAR_NAME` column.
    pub fn from_table(table: ColumnTable) -> Result<Self> {
        let name_col = table.column_index(STAR_NAME_KEY)?;
        Ok(StarCatalog { table, name_col })
    }

    /// Parse a catalog from in-memory text.
    pub fn parse(source: &str) -> Result<Self> {
        Self::from_table(ColumnTable::parse(source)?)
    }

    /// Read and parse a catalog from a file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_table(ColumnTable::load(path)?)
    }

    /// Row position of a star, by exact catalog name.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        (0..self.table.len())
            .find(|&i| {
                self.table
                    .row(i)
                    .map(|row| row[self.name_col].as_str() == name)
                    .unwrap_or(false)
            })
            .ok_or_else(|| Error::UnknownStar {
                name: name.to_string(),
            })
    }

    /// One field of one star, as raw text.
    pub fn field(&self, name: &str, keyword: &str) -> Result<&str> {
        let row_idx = self.index_of(name)?;
        let col = self.table.column_index(keyword)?;
        self.table
            .row(row_idx)
            .map(|row| row[col].as_str())
            .ok_or_else(|| Error::UnknownStar {
                name: name.to_string(),
            })
    }

    /// One field of one star, cast to a float.
    pub fn float_field(&self, name: &str, keyword: &str) -> Result<f64> {
        let raw = self.field(name, keyword)?;
        value::float(raw).map_err(|e| Error::TypeCast {
            key: format!("{keyword} ({name})"),
            value: raw.to_string(),
            target: e.target,
            cause: e.cause,
        })
    }

    /// Presentation name for a star: the `STAR_NAME_PLOTS` value with
    /// underscores mapped back to spaces.
    pub fn display_name(&self, name: &str) -> Result<String> {
        Ok(self.field(name, PLOT_NAME_KEY)?.replace('_', " "))
    }

    /// Catalog names in row order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        (0..self.table.len())
            .filter_map(move |i| self.table.row(i).map(|row| row[self.name_col].as_str()))
    }

    /// The backing table, for columns beyond the named helpers.
    pub fn table(&self) -> &ColumnTable {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
