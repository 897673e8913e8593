//! Per-line deck model.
//!
//! Every line of a deck is kept, classified, and rendered back verbatim
//! unless an edit touches it. The dust dialect is the subtle one: a
//! leading `*` immediately followed by `key=` marks an inactive
//! alternative (a disabled default kept for reference), while `*` followed
//! by anything else is a comment and an all-`*` line is a section bar.

use outflow_common::{Error, Result};
use outflow_config::{DialectSpec, InlineComment};

/// Classification of one deck line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Blank,
    Comment,
    /// A line of repeated section-marker characters.
    SectionBar,
    Entry(EntryLine),
}

/// A `key=value` line, active or disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryLine {
    /// Key exactly as written in the file.
    pub key: String,
    pub value: String,
    /// Inline annotation after the value, without its marker.
    pub annotation: Option<String>,
    /// False for inactive alternative lines.
    pub active: bool,
}

/// One deck line: raw text (without its newline) plus its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckLine {
    pub raw: String,
    pub kind: LineKind,
}

impl DeckLine {
    /// Classify one raw line under a dialect.
    pub fn classify(raw: &str, dialect: &DialectSpec, line_no: usize) -> Result<DeckLine> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(DeckLine {
                raw: raw.to_string(),
                kind: LineKind::Blank,
            });
        }

        if let Some(marker) = dialect.inactive_prefix() {
            if let Some(rest) = trimmed.strip_prefix(marker) {
                return Ok(DeckLine {
                    raw: raw.to_string(),
                    kind: classify_marked(trimmed, rest, marker, dialect),
                });
            }
        }

        if dialect.is_full_line_comment(trimmed) {
            return Ok(DeckLine {
                raw: raw.to_string(),
                kind: LineKind::Comment,
            });
        }

        let Some((key_side, value_side)) = trimmed.split_once('=') else {
            return Err(Error::Parse {
                line: line_no,
                message: format!("expected key=value, got '{trimmed}'"),
            });
        };
        let key = key_side.trim();
        if key.is_empty() {
            return Err(Error::Parse {
                line: line_no,
                message: "empty key before '='".to_string(),
            });
        }

        let (value, annotation) = split_value(value_side, dialect);
        Ok(DeckLine {
            raw: raw.to_string(),
            kind: LineKind::Entry(EntryLine {
                key: key.to_string(),
                value,
                annotation,
                active: true,
            }),
        })
    }

    /// The entry key, for entry lines.
    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Entry(entry) => Some(&entry.key),
            _ => None,
        }
    }

    /// The entry value, for entry lines.
    pub fn value(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Entry(entry) => Some(&entry.value),
            _ => None,
        }
    }

    pub fn is_active_entry(&self) -> bool {
        matches!(&self.kind, LineKind::Entry(entry) if entry.active)
    }
}

/// Classify a line that starts with the dialect's inactive marker.
fn classify_marked(trimmed: &str, rest: &str, marker: char, dialect: &DialectSpec) -> LineKind {
    // A run of markers is a section bar; a lone marker is a comment.
    if trimmed.chars().all(|c| c == marker) {
        return if trimmed.len() >= 2 {
            LineKind::SectionBar
        } else {
            LineKind::Comment
        };
    }

    // Inactive alternative: the marker is immediately followed by `key=`,
    // with the `=` inside the first whitespace-delimited chunk.
    let immediate = rest.chars().next().is_some_and(|c| !c.is_whitespace());
    let head = rest.split_whitespace().next().unwrap_or("");
    if immediate && head.contains('=') && !head.starts_with('=') {
        if let Some((key_side, value_side)) = rest.split_once('=') {
            let (value, annotation) = split_value(value_side, dialect);
            return LineKind::Entry(EntryLine {
                key: key_side.trim().to_string(),
                value,
                annotation,
                active: false,
            });
        }
    }

    LineKind::Comment
}

/// Split a raw value side into (value, annotation) per the dialect's
/// inline-comment rule.
fn split_value(value_side: &str, dialect: &DialectSpec) -> (String, Option<String>) {
    match dialect.inline() {
        InlineComment::None => (value_side.trim().to_string(), None),
        InlineComment::Chars(markers) => match value_side.find(|c| markers.contains(&c)) {
            Some(idx) => {
                let value = value_side[..idx].trim().to_string();
                let annotation = value_side[idx..]
                    .trim_start_matches(|c| markers.contains(&c))
                    .trim();
                (value, non_empty(annotation))
            }
            None => (value_side.trim().to_string(), None),
        },
        InlineComment::TrailingWhitespace => {
            let trimmed = value_side.trim();
            match trimmed.split_once(|c: char| c.is_whitespace()) {
                Some((value, rest)) => (value.to_string(), non_empty(rest.trim())),
                None => (trimmed.to_string(), None),
            }
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
