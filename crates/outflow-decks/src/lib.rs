//! Outflow simulation input decks.
//!
//! This crate provides:
//! - An order-preserving deck model and round-trip editor
//! - Typed `TRANSITION=` line parsing and rendering
//! - Telescope `.spec` file helpers: `LINE_SPEC=` block merging and dish
//!   constants

pub mod editor;
pub mod line;
pub mod linespec;
pub mod transition;

pub use editor::DeckEditor;
pub use line::{DeckLine, EntryLine, LineKind};
pub use linespec::{merge_line_specs, telescope_diameter_m, LineSpecEntry};
pub use transition::TransitionLine;
