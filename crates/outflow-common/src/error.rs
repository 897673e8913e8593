//! Unified error taxonomy for Outflow.
//!
//! Every fallible operation in the workspace returns [`Error`]. Variants are
//! grouped into numeric bands by concern so scripting callers can branch on
//! [`Error::code`] without string matching. Configuration is load-once and
//! fail-fast: a malformed file aborts the calling workflow rather than
//! proceeding with partial data, because a misparsed parameter fed to the
//! external simulation codes produces plausible-looking but wrong output.

use thiserror::Error;

/// Unified error type for all Outflow operations.
#[derive(Debug, Error)]
pub enum Error {
    // Document errors (10-19)
    /// A line did not match the active dialect's grammar.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required key is absent and no default was supplied.
    #[error("missing key '{key}'")]
    MissingKey { key: String },

    /// A raw value could not be converted to the requested type.
    #[error("cannot cast {key}='{value}' as {target}: {cause}")]
    TypeCast {
        key: String,
        value: String,
        target: &'static str,
        cause: String,
    },

    /// A path template could not be resolved.
    #[error("path template error for '{key}': {message}")]
    Template { key: String, message: String },

    // Table errors (20-29)
    /// A tabular row has the wrong column count.
    #[error("{context}: expected {expected} columns, found {found}")]
    RowShape {
        context: String,
        expected: usize,
        found: usize,
    },

    /// Telescope lookup miss. Callers must not default a dish size.
    #[error("unknown telescope '{name}'")]
    UnknownTelescope { name: String },

    /// Star catalog lookup miss.
    #[error("unknown star '{name}'")]
    UnknownStar { name: String },

    /// A keyword column is absent from a table header.
    #[error("unknown column keyword '{keyword}'")]
    UnknownColumn { keyword: String },

    // Snapshot errors (30-39)
    /// A provenance snapshot was written by an incompatible schema.
    #[error("snapshot schema version {found} is not compatible (expected {expected})")]
    IncompatibleSchema { found: String, expected: String },

    // I/O and serialization errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Return the numeric error code for this error.
    pub fn code(&self) -> u32 {
        match self {
            Error::Parse { .. } => 10,
            Error::MissingKey { .. } => 11,
            Error::TypeCast { .. } => 12,
            Error::Template { .. } => 13,
            Error::RowShape { .. } => 20,
            Error::UnknownTelescope { .. } => 21,
            Error::UnknownStar { .. } => 22,
            Error::UnknownColumn { .. } => 23,
            Error::IncompatibleSchema { .. } => 30,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}

/// Convenience result type used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;
