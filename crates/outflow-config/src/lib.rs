//! Outflow configuration loading and resolution.
//!
//! This crate provides:
//! - Dialect descriptions for the three keyed file formats we read
//! - Ordered `key=value` document parsing with typed lookups
//! - Folder-path mapping with `$star_name$` template resolution
//! - An explicit home-folder layout object (no ambient path state)
//! - Run-provenance snapshots for reproducibility

pub mod dialect;
pub mod document;
pub mod layout;
pub mod paths;
pub mod snapshot;

pub use dialect::{DialectSpec, InlineComment, KeyCase};
pub use document::ConfigDocument;
pub use layout::HomeLayout;
pub use paths::{PathEntry, PathMap, PathRole, STAR_TOKEN};
pub use snapshot::{sha256_hex, ConfigSnapshot, SourceDigest};
