//! LINE_SPEC blocks of per-telescope spec files.
//!
//! Each telescope has a spec file holding its dish diameter and a block of
//! LINE_SPEC rows, one per spectral line observed with that telescope:
//! molecule, eight quantum numbers, beam width in arcsec, and main-beam
//! efficiency, with an optional `!` comment. [`merge_line_specs`] folds new
//! rows into that block the way the radiative-transfer code expects it:
//! deduplicated, sorted, tab-separated, and terminated by a `#` bar.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use outflow_common::{value, Error, Result};

use crate::transition::TransitionLine;

/// Width of the `#` bar terminating a merged LINE_SPEC block.
const CLOSING_BAR_WIDTH: usize = 38;

/// One LINE_SPEC row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpecEntry {
    pub molecule: String,
    pub vup: u32,
    pub jup: u32,
    pub kaup: u32,
    pub kcup: u32,
    pub vlow: u32,
    pub jlow: u32,
    pub kalow: u32,
    pub kclow: u32,
    /// Beam FWHM at the line frequency, arcsec.
    pub beamwidth: f64,
    /// Main-beam efficiency at the line frequency.
    pub efficiency: f64,
    pub comment: Option<String>,
}

impl LineSpecEntry {
    /// Parse one LINE_SPEC row, with or without its `LINE_SPEC=` prefix.
    /// Accepts both space- and tab-separated fields.
    pub fn parse(line: &str) -> Result<LineSpecEntry> {
        let trimmed = line.trim();
        let body = trimmed.strip_prefix("LINE_SPEC=").unwrap_or(trimmed);
        let tokens: Vec<&str> = body.split_whitespace().collect();
        if tokens.len() < 11 {
            return Err(Error::RowShape {
                context: "LINE_SPEC value".to_string(),
                expected: 11,
                found: tokens.len(),
            });
        }

        let comment = match tokens.get(11) {
            None => None,
            Some(&"!") => {
                let text = tokens[12..].join(" ");
                if text.is_empty() {
                    None
                } else {
                    Some(text)
                }
            }
            Some(_) => {
                return Err(Error::RowShape {
                    context: "LINE_SPEC value".to_string(),
                    expected: 11,
                    found: tokens.len(),
                });
            }
        };

        Ok(LineSpecEntry {
            molecule: tokens[0].to_string(),
            vup: field_int(tokens[1], "vup")?,
            jup: field_int(tokens[2], "jup")?,
            kaup: field_int(tokens[3], "kaup")?,
            kcup: field_int(tokens[4], "kcup")?,
            vlow: field_int(tokens[5], "vlow")?,
            jlow: field_int(tokens[6], "jlow")?,
            kalow: field_int(tokens[7], "kalow")?,
            kclow: field_int(tokens[8], "kclow")?,
            beamwidth: field_float(tokens[9], "beamwidth")?,
            efficiency: field_float(tokens[10], "efficiency")?,
            comment,
        })
    }

    /// Build a row from a deck transition plus the beam parameters for the
    /// telescope it was observed with.
    pub fn from_transition(t: &TransitionLine, beamwidth: f64, efficiency: f64) -> LineSpecEntry {
        LineSpecEntry {
            molecule: t.molecule.clone(),
            vup: t.vup,
            jup: t.jup,
            kaup: t.kaup,
            kcup: t.kcup,
            vlow: t.vlow,
            jlow: t.jlow,
            kalow: t.kalow,
            kclow: t.kclow,
            beamwidth,
            efficiency,
            comment: None,
        }
    }

    /// True when both rows describe the same spectral line.
    pub fn same_transition(&self, other: &LineSpecEntry) -> bool {
        self.molecule == other.molecule
            && self.vup == other.vup
            && self.jup == other.jup
            && self.kaup == other.kaup
            && self.kcup == other.kcup
            && self.vlow == other.vlow
            && self.jlow == other.jlow
            && self.kalow == other.kalow
            && self.kclow == other.kclow
    }

    /// Render as a space-separated LINE_SPEC line.
    pub fn render(&self) -> String {
        let mut line = format!(
            "LINE_SPEC={} {} {} {} {} {} {} {} {} {:.2} {:.2}",
            self.molecule,
            self.vup,
            self.jup,
            self.kaup,
            self.kcup,
            self.vlow,
            self.jlow,
            self.kalow,
            self.kclow,
            self.beamwidth,
            self.efficiency,
        );
        if let Some(comment) = &self.comment {
            line.push_str(" ! ");
            line.push_str(comment);
        }
        line
    }
}

/// Merge rows into a telescope spec file's LINE_SPEC block.
///
/// Lines before the block are kept verbatim. Rows already present keep
/// their existing values; additions describing a spectral line the block
/// already has are dropped. The rebuilt block is sorted by molecule and
/// beam width, tab-separated, and followed by a blank line and a `#` bar.
pub fn merge_line_specs(spec_text: &str, additions: &[LineSpecEntry]) -> Result<String> {
    let lines: Vec<&str> = spec_text.lines().collect();
    let block_start = lines
        .iter()
        .position(|line| line.starts_with("LINE_SPEC"))
        .unwrap_or(lines.len());

    let mut entries = Vec::new();
    for line in &lines[block_start..] {
        if line.starts_with("LINE_SPEC") {
            entries.push(LineSpecEntry::parse(line)?);
        }
    }
    for addition in additions {
        if !entries.iter().any(|e| e.same_transition(addition)) {
            entries.push(addition.clone());
        }
    }
    entries.sort_by(|a, b| {
        a.molecule.cmp(&b.molecule).then(
            a.beamwidth
                .partial_cmp(&b.beamwidth)
                .unwrap_or(Ordering::Equal),
        )
    });

    let mut out = String::new();
    for line in &lines[..block_start] {
        out.push_str(line);
        out.push('\n');
    }
    for entry in &entries {
        out.push_str(&entry.render().replace(' ', "\t"));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&"#".repeat(CLOSING_BAR_WIDTH));
    out.push('\n');
    Ok(out)
}

/// Dish diameter in meters from a telescope spec file's TELESCOPE_DIAM
/// line.
pub fn telescope_diameter_m(spec_text: &str) -> Result<f64> {
    for line in spec_text.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with("TELESCOPE_DIAM") {
            continue;
        }
        let Some((_, value_side)) = trimmed.split_once('=') else {
            continue;
        };
        let raw = value_side.split('!').next().unwrap_or("").trim();
        return value::float(raw).map_err(|cause| Error::TypeCast {
            key: "TELESCOPE_DIAM".to_string(),
            value: raw.to_string(),
            target: cause.target,
            cause: cause.cause,
        });
    }
    Err(Error::MissingKey {
        key: "TELESCOPE_DIAM".to_string(),
    })
}

fn field_int(token: &str, name: &'static str) -> Result<u32> {
    let n = value::int(token).map_err(|cause| Error::TypeCast {
        key: format!("LINE_SPEC {name}"),
        value: token.to_string(),
        target: cause.target,
        cause: cause.cause,
    })?;
    u32::try_from(n).map_err(|_| Error::TypeCast {
        key: format!("LINE_SPEC {name}"),
        value: token.to_string(),
        target: "non-negative int",
        cause: "quantum numbers cannot be negative".to_string(),
    })
}

fn field_float(token: &str, name: &'static str) -> Result<f64> {
    value::float(token).map_err(|cause| Error::TypeCast {
        key: format!("LINE_SPEC {name}"),
        value: token.to_string(),
        target: cause.target,
        cause: cause.cause,
    })
}
