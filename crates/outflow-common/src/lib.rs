//! Outflow shared types and utilities.
//!
//! This crate provides:
//! - Core ID types (StarName, RunId)
//! - Unified error taxonomy for config, table, and deck handling
//! - Typed value casters for the Fortran-facing file formats
//! - Snapshot schema versioning

pub mod error;
pub mod id;
pub mod schema;
pub mod value;

pub use error::{Error, Result};
pub use id::{RunId, StarName};
pub use schema::{is_compatible, MIN_COMPATIBLE_VERSION, SNAPSHOT_SCHEMA_VERSION};
