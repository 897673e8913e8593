//! TRANSITION lines of the gas deck.
//!
//! A transition value carries twelve whitespace-separated fields: the
//! molecule tag, eight quantum numbers (v, J, Ka, Kc for the upper and
//! lower level), the telescope name, the velocity offset, and the number
//! of quadrature points.

use serde::{Deserialize, Serialize};

use outflow_common::{value, Error, Result};

/// One parsed TRANSITION value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionLine {
    pub molecule: String,
    pub vup: u32,
    pub jup: u32,
    pub kaup: u32,
    pub kcup: u32,
    pub vlow: u32,
    pub jlow: u32,
    pub kalow: u32,
    pub kclow: u32,
    /// Telescope name, uppercased on parse.
    pub telescope: String,
    /// Velocity offset from the systemic velocity, km/s.
    pub offset: f64,
    pub n_quad: u32,
}

impl TransitionLine {
    /// Parse the value side of a TRANSITION line.
    pub fn parse(value_str: &str) -> Result<TransitionLine> {
        let tokens: Vec<&str> = value_str.split_whitespace().collect();
        if tokens.len() != 12 {
            return Err(Error::RowShape {
                context: "TRANSITION value".to_string(),
                expected: 12,
                found: tokens.len(),
            });
        }

        Ok(TransitionLine {
            molecule: tokens[0].to_string(),
            vup: quantum(tokens[1], "vup")?,
            jup: quantum(tokens[2], "jup")?,
            kaup: quantum(tokens[3], "kaup")?,
            kcup: quantum(tokens[4], "kcup")?,
            vlow: quantum(tokens[5], "vlow")?,
            jlow: quantum(tokens[6], "jlow")?,
            kalow: quantum(tokens[7], "kalow")?,
            kclow: quantum(tokens[8], "kclow")?,
            telescope: tokens[9].to_ascii_uppercase(),
            offset: value::float(tokens[10]).map_err(|cause| Error::TypeCast {
                key: "TRANSITION offset".to_string(),
                value: tokens[10].to_string(),
                target: cause.target,
                cause: cause.cause,
            })?,
            n_quad: quantum(tokens[11], "n_quad")?,
        })
    }

    /// The value side, ready for `TRANSITION=...`.
    pub fn render_value(&self) -> String {
        format!(
            "{} {} {} {} {} {} {} {} {} {} {:.2} {}",
            self.molecule,
            self.vup,
            self.jup,
            self.kaup,
            self.kcup,
            self.vlow,
            self.jlow,
            self.kalow,
            self.kclow,
            self.telescope,
            self.offset,
            self.n_quad,
        )
    }

    /// The full deck line.
    pub fn render(&self) -> String {
        format!("TRANSITION={}", self.render_value())
    }
}

fn quantum(token: &str, name: &'static str) -> Result<u32> {
    let n = value::int(token).map_err(|cause| Error::TypeCast {
        key: format!("TRANSITION {name}"),
        value: token.to_string(),
        target: cause.target,
        cause: cause.cause,
    })?;
    u32::try_from(n).map_err(|_| Error::TypeCast {
        key: format!("TRANSITION {name}"),
        value: token.to_string(),
        target: "non-negative int",
        cause: "quantum numbers cannot be negative".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_co_transition() {
        let t = TransitionLine::parse("12C16O 0 3 0 0 0 2 0 0 JCMT 0.0 50").unwrap();
        assert_eq!(t.molecule, "12C16O");
        assert_eq!((t.vup, t.jup, t.kaup, t.kcup), (0, 3, 0, 0));
        assert_eq!((t.vlow, t.jlow, t.kalow, t.kclow), (0, 2, 0, 0));
        assert_eq!(t.telescope, "JCMT");
        assert_eq!(t.offset, 0.0);
        assert_eq!(t.n_quad, 50);
    }

    #[test]
    fn test_telescope_uppercased() {
        let t = TransitionLine::parse("SiO 1 5 0 0 1 4 0 0 apex 12.5 30").unwrap();
        assert_eq!(t.telescope, "APEX");
    }

    #[test]
    fn test_render() {
        let t = TransitionLine::parse("12C16O 0 3 0 0 0 2 0 0 JCMT 0.0 50").unwrap();
        assert_eq!(t.render(), "TRANSITION=12C16O 0 3 0 0 0 2 0 0 JCMT 0.00 50");
    }

    #[test]
    fn test_render_parse_roundtrip() {
        let t = TransitionLine::parse("o-H2O 0 1 1 0 0 1 0 1 HIFI -2.5 40").unwrap();
        let again = TransitionLine::parse(&t.render_value()).unwrap();
        assert_eq!(again, t);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = TransitionLine::parse("12C16O 0 3 0 0 0 2 0 0 JCMT 0.0").unwrap_err();
        assert!(matches!(
            err,
            Error::RowShape {
                expected: 12,
                found: 11,
                ..
            }
        ));
    }

    #[test]
    fn test_negative_quantum_number() {
        let err = TransitionLine::parse("12C16O 0 -3 0 0 0 2 0 0 JCMT 0.0 50").unwrap_err();
        assert!(matches!(err, Error::TypeCast { key, .. } if key == "TRANSITION jup"));
    }

    #[test]
    fn test_bad_offset() {
        let err = TransitionLine::parse("12C16O 0 3 0 0 0 2 0 0 JCMT north 50").unwrap_err();
        assert!(matches!(err, Error::TypeCast { key, .. } if key == "TRANSITION offset"));
    }
}
