//! Verbatim round-trip deck editing.
//!
//! A [`DeckEditor`] keeps every line of the input, edits only the lines it
//! is told to change, and renders the rest back byte for byte. Untouched
//! comments, section bars, inactive alternatives, and spacing all survive
//! a parse/render cycle unchanged.

use std::fs;
use std::path::Path;

use tracing::debug;

use outflow_common::{Error, Result};
use outflow_config::DialectSpec;

use crate::line::{DeckLine, EntryLine, LineKind};

/// Line-preserving editor for one deck.
#[derive(Debug, Clone)]
pub struct DeckEditor {
    dialect: DialectSpec,
    lines: Vec<DeckLine>,
    trailing_newline: bool,
}

impl DeckEditor {
    /// Parse deck text. Fails on the first malformed line.
    pub fn parse(text: &str, dialect: DialectSpec) -> Result<DeckEditor> {
        let trailing_newline = text.ends_with('\n');
        let mut pieces: Vec<&str> = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n').collect()
        };
        if trailing_newline {
            pieces.pop();
        }

        let mut lines = Vec::with_capacity(pieces.len());
        for (idx, piece) in pieces.iter().enumerate() {
            lines.push(DeckLine::classify(piece, &dialect, idx + 1)?);
        }
        debug!(dialect = dialect.name(), lines = lines.len(), "parsed deck");

        Ok(DeckEditor {
            dialect,
            lines,
            trailing_newline,
        })
    }

    /// Read and parse a deck file.
    pub fn load(path: impl AsRef<Path>, dialect: DialectSpec) -> Result<DeckEditor> {
        let text = fs::read_to_string(path)?;
        DeckEditor::parse(&text, dialect)
    }

    /// Last active value for a key, or None.
    pub fn get(&self, key: &str) -> Option<&str> {
        let wanted = self.dialect.canonical_key(key);
        self.lines.iter().rev().find_map(|line| match &line.kind {
            LineKind::Entry(entry)
                if entry.active && self.dialect.canonical_key(&entry.key) == wanted =>
            {
                Some(entry.value.as_str())
            }
            _ => None,
        })
    }

    /// Like [`get`](DeckEditor::get) but missing keys are an error.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            key: self.dialect.canonical_key(key),
        })
    }

    /// All active values for a key, in file order. Used for repeatable
    /// keys such as the gas deck's MOLECULE and TRANSITION lines.
    pub fn entries(&self, key: &str) -> Vec<&str> {
        let wanted = self.dialect.canonical_key(key);
        self.lines
            .iter()
            .filter_map(|line| match &line.kind {
                LineKind::Entry(entry)
                    if entry.active && self.dialect.canonical_key(&entry.key) == wanted =>
                {
                    Some(entry.value.as_str())
                }
                _ => None,
            })
            .collect()
    }

    /// All parsed lines, in file order.
    pub fn lines(&self) -> &[DeckLine] {
        &self.lines
    }

    /// Set a key to a value.
    ///
    /// If an active line with the key exists its value is replaced in
    /// place (the key keeps its original spelling; any stale annotation is
    /// dropped). Otherwise a new active line is appended at the end of the
    /// section holding the key's inactive alternative, or at the end of
    /// the deck. Existing lines are never reordered.
    pub fn set(&mut self, key: &str, value: &str) {
        let wanted = self.dialect.canonical_key(key);

        let active_idx = self.lines.iter().rposition(|line| match &line.kind {
            LineKind::Entry(entry) => {
                entry.active && self.dialect.canonical_key(&entry.key) == wanted
            }
            _ => false,
        });
        if let Some(idx) = active_idx {
            let line = &mut self.lines[idx];
            if let LineKind::Entry(entry) = &mut line.kind {
                entry.value = value.to_string();
                entry.annotation = None;
                line.raw = format!("{}={}", entry.key, value);
            }
            return;
        }

        let new_line = DeckLine {
            raw: format!("{key}={value}"),
            kind: LineKind::Entry(EntryLine {
                key: key.to_string(),
                value: value.to_string(),
                annotation: None,
                active: true,
            }),
        };

        // No active line: place the new one inside the section that
        // mentions the key (as an inactive alternative), if any.
        let any_idx = self.lines.iter().rposition(|line| match &line.kind {
            LineKind::Entry(entry) => self.dialect.canonical_key(&entry.key) == wanted,
            _ => false,
        });
        match any_idx {
            Some(idx) => {
                let at = self.section_end(idx);
                self.lines.insert(at, new_line);
            }
            None => self.lines.push(new_line),
        }
    }

    /// Render the deck back to text. Untouched lines come out verbatim.
    pub fn render(&self) -> String {
        let mut out = self
            .lines
            .iter()
            .map(|line| line.raw.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Render and write the deck to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Index just past the section containing `idx`: the next section bar,
    /// or the end of the deck.
    fn section_end(&self, idx: usize) -> usize {
        self.lines[idx + 1..]
            .iter()
            .position(|line| line.kind == LineKind::SectionBar)
            .map(|offset| idx + 1 + offset)
            .unwrap_or(self.lines.len())
    }
}
