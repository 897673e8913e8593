//! Outflow catalog tables.
//!
//! This crate provides:
//! - A generic whitespace-delimited keyword-column table reader
//! - The telescope table (dish sizes and absolute flux uncertainties)
//! - The star catalog (per-star fields keyed by star name)

pub mod columns;
pub mod star;
pub mod telescope;

pub use columns::ColumnTable;
pub use star::StarCatalog;
pub use telescope::{TelescopeSpec, TelescopeTable};
