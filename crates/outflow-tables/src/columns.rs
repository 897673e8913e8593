//! Whitespace-delimited keyword-column tables.
//!
//! Catalog files (`Star.dat`, `Dust.dat`, and friends) are whitespace
//! tables whose column names live in the last `#` comment line before the
//! first data row. [`ColumnTable`] reads the grid once, enforces a uniform
//! row width, and serves columns or rows by keyword.

use outflow_common::value;
use outflow_common::{Error, Result};
use std::path::Path;
use tracing::debug;

/// One parsed keyword-column table. Immutable after load.
#[derive(Debug, Clone)]
pub struct ColumnTable {
    keywords: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ColumnTable {
    /// Parse a table from in-memory text.
    pub fn parse(source: &str) -> Result<Self> {
        let mut header: Option<(usize, Vec<String>)> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut first_data_line = 1usize;

        for (idx, raw) in source.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('#') {
                // The last comment line before the data carries the keywords;
                // comments after the data are ignored.
                if rows.is_empty() {
                    header = Some((
                        line,
                        rest.split_whitespace().map(str::to_string).collect(),
                    ));
                }
                continue;
            }

            let tokens: Vec<String> = trimmed.split_whitespace().map(str::to_string).collect();
            if rows.is_empty() {
                first_data_line = line;
            } else if let Some(first) = rows.first() {
                if tokens.len() != first.len() {
                    return Err(Error::RowShape {
                        context: format!("table line {line}"),
                        expected: first.len(),
                        found: tokens.len(),
                    });
                }
            }
            rows.push(tokens);
        }

        let Some((header_line, keywords)) = header else {
            return Err(Error::Parse {
                line: first_data_line,
                message: "no #-keyword header before first data row".to_string(),
            });
        };
        if let Some(first) = rows.first() {
            if keywords.len() != first.len() {
                return Err(Error::RowShape {
                    context: format!("keyword header at line {header_line}"),
                    expected: first.len(),
                    found: keywords.len(),
                });
            }
        }

        debug!(keywords = keywords.len(), rows = rows.len(), "parsed column table");
        Ok(ColumnTable { keywords, rows })
    }

    /// Read and parse a table from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::parse(&source)
    }

    /// The header keywords, in column order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Position of a keyword in the header.
    pub fn column_index(&self, keyword: &str) -> Result<usize> {
        self.keywords
            .iter()
            .position(|k| k == keyword)
            .ok_or_else(|| Error::UnknownColumn {
                keyword: keyword.to_string(),
            })
    }

    /// One column's cells, top to bottom.
    pub fn column(&self, keyword: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(keyword)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// One column's cells cast to floats.
    pub fn float_column(&self, keyword: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(keyword)?;
        let mut out = Vec::with_capacity(self.rows.len());
        for (row_no, row) in self.rows.iter().enumerate() {
            let raw = &row[idx];
            let parsed = value::float(raw).map_err(|e| Error::TypeCast {
                key: format!("{keyword} (row {})", row_no + 1),
                value: raw.clone(),
                target: e.target,
                cause: e.cause,
            })?;
            out.push(parsed);
        }
        Ok(out)
    }

    /// One data row by zero-based index.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAR_DAT: &str = "\
# Star catalog for the modeling grid.
#STAR_NAME STAR_NAME_PLOTS DISTANCE V_LSR
IRC+10216  IRC_+10216      150.     -26.
o_cet      o_Cet           91.7     46.8
";

    #[test]
    fn test_parse_and_select_column() {
        let table = ColumnTable::parse(STAR_DAT).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.keywords(),
            &["STAR_NAME", "STAR_NAME_PLOTS", "DISTANCE", "V_LSR"]
        );
        assert_eq!(
            table.column("STAR_NAME").unwrap(),
            vec!["IRC+10216", "o_cet"]
        );
    }

    #[test]
    fn test_last_comment_line_is_header() {
        // The first comment line is prose; the second carries the keywords.
        let table = ColumnTable::parse(STAR_DAT).unwrap();
        assert_eq!(table.keywords()[0], "STAR_NAME");
    }

    #[test]
    fn test_float_column() {
        let table = ColumnTable::parse(STAR_DAT).unwrap();
        assert_eq!(table.float_column("DISTANCE").unwrap(), vec![150.0, 91.7]);
    }

    #[test]
    fn test_float_column_bad_cell() {
        let source = "#A B\nx far\n";
        let table = ColumnTable::parse(source).unwrap();
        let err = table.float_column("B").unwrap_err();
        match err {
            Error::TypeCast { key, value, .. } => {
                assert!(key.contains("B"));
                assert_eq!(value, "far");
            }
            other => panic!("expected TypeCast, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_column() {
        let table = ColumnTable::parse(STAR_DAT).unwrap();
        let err = table.column("T_EFF").unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { keyword } if keyword == "T_EFF"));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let source = "#A B C\n1 2 3\n4 5\n";
        let err = ColumnTable::parse(source).unwrap_err();
        match err {
            Error::RowShape { expected, found, .. } => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected RowShape, got {other:?}"),
        }
    }

    #[test]
    fn test_header_width_must_match_rows() {
        let source = "#A B\n1 2 3\n";
        let err = ColumnTable::parse(source).unwrap_err();
        assert!(matches!(err, Error::RowShape { .. }));
    }

    #[test]
    fn test_missing_header_rejected() {
        let err = ColumnTable::parse("1 2 3\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 1, .. }));
    }

    #[test]
    fn test_comments_after_data_ignored() {
        let source = "#A B\n1 2\n# trailing note\n3 4\n";
        let table = ColumnTable::parse(source).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.keywords(), &["A", "B"]);
    }

    #[test]
    fn test_row_access() {
        let table = ColumnTable::parse(STAR_DAT).unwrap();
        let row = table.row(1).unwrap();
        assert_eq!(row[0], "o_cet");
        assert!(table.row(7).is_none());
    }
}
