//! Typed casters for raw string values.
//!
//! The external simulation codes are Fortran programs, so numeric literals
//! in their input files may carry `d`/`D` exponent markers (`1d-4`) and
//! booleans are written `.true.` / `.false.`. All casts are
//! locale-independent with `.` as the decimal separator.
//!
//! Casters report a [`CastError`] without key context; the document layer
//! attaches the key and raw value when it maps the failure into the unified
//! error type.

use std::borrow::Cow;
use thiserror::Error;

/// Failure of a single cast, before key context is attached.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct CastError {
    /// Target type name, e.g. `"float"`.
    pub target: &'static str,
    /// Human-readable cause.
    pub cause: String,
}

/// Result type for bare casters.
pub type CastResult<T> = std::result::Result<T, CastError>;

/// Cast to `f64`.
///
/// Accepts standard float syntax (`12.`, `2.8e-7`) plus Fortran `d`/`D`
/// exponent markers (`1d-4`, `1.5D+3`).
pub fn float(raw: &str) -> CastResult<f64> {
    let trimmed = raw.trim();
    normalize_exponent(trimmed)
        .parse::<f64>()
        .map_err(|e| CastError {
            target: "float",
            cause: e.to_string(),
        })
}

/// Cast to `i64`.
pub fn int(raw: &str) -> CastResult<i64> {
    raw.trim().parse::<i64>().map_err(|e| CastError {
        target: "int",
        cause: e.to_string(),
    })
}

/// Cast to `bool` from the Fortran literals `.true.` / `.false.` (any
/// case) or the digits `1` / `0`.
pub fn boolean(raw: &str) -> CastResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        ".true." | "1" => Ok(true),
        ".false." | "0" => Ok(false),
        _ => Err(CastError {
            target: "bool",
            cause: "expected .true., .false., 1, or 0".to_string(),
        }),
    }
}

/// Cast a bracketed comma list `[a, b, c]` to its elements.
///
/// Elements are trimmed; `[]` yields an empty list.
pub fn list(raw: &str) -> CastResult<Vec<String>> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| CastError {
            target: "list",
            cause: "expected a bracketed list like [a,b,c]".to_string(),
        })?;
    let inner = inner.trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    Ok(inner.split(',').map(|item| item.trim().to_string()).collect())
}

/// Rewrite a Fortran `d`/`D` exponent marker to `e` so the standard float
/// parser accepts it.
///
/// Only a marker sitting between a digit (or `.`) and a digit or sign is
/// rewritten, so words like `nan` or garbage input still fail the cast.
fn normalize_exponent(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        let is_marker = b == b'd' || b == b'D';
        if !is_marker || i == 0 {
            continue;
        }
        let prev_ok = bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.';
        let next_ok = bytes
            .get(i + 1)
            .is_some_and(|&n| n.is_ascii_digit() || n == b'+' || n == b'-');
        if prev_ok && next_ok {
            let mut out = s.to_string();
            out.replace_range(i..=i, "e");
            return Cow::Owned(out);
        }
    }
    Cow::Borrowed(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── float ───────────────────────────────────────────────────────────

    #[test]
    fn test_float_plain() {
        assert_eq!(float("12.").unwrap(), 12.0);
        assert_eq!(float("0.2").unwrap(), 0.2);
        assert_eq!(float(" -3.5 ").unwrap(), -3.5);
    }

    #[test]
    fn test_float_standard_exponent() {
        assert_eq!(float("2.8e-7").unwrap(), 2.8e-7);
        assert_eq!(float("1E3").unwrap(), 1000.0);
    }

    #[test]
    fn test_float_fortran_exponent() {
        assert_eq!(float("1d-4").unwrap(), 1e-4);
        assert_eq!(float("1.5D+3").unwrap(), 1500.0);
        assert_eq!(float("2.8d-7").unwrap(), 2.8e-7);
    }

    #[test]
    fn test_float_rejects_words() {
        assert!(float("fast").is_err());
        assert!(float("").is_err());
        assert!(float("donut").is_err());
    }

    #[test]
    fn test_float_error_names_target() {
        let err = float("xyz").unwrap_err();
        assert_eq!(err.target, "float");
    }

    // ── int ─────────────────────────────────────────────────────────────

    #[test]
    fn test_int_plain() {
        assert_eq!(int("61").unwrap(), 61);
        assert_eq!(int(" -3 ").unwrap(), -3);
    }

    #[test]
    fn test_int_rejects_float() {
        assert!(int("1.5").is_err());
        assert!(int("1e3").is_err());
    }

    // ── boolean ─────────────────────────────────────────────────────────

    #[test]
    fn test_boolean_fortran_literals() {
        assert!(boolean(".true.").unwrap());
        assert!(!boolean(".false.").unwrap());
        assert!(boolean(".TRUE.").unwrap());
        assert!(!boolean(".False.").unwrap());
    }

    #[test]
    fn test_boolean_digits() {
        assert!(boolean("1").unwrap());
        assert!(!boolean("0").unwrap());
    }

    #[test]
    fn test_boolean_rejects_bare_words() {
        assert!(boolean("true").is_err());
        assert!(boolean("yes").is_err());
        assert!(boolean("").is_err());
    }

    // ── list ────────────────────────────────────────────────────────────

    #[test]
    fn test_list_basic() {
        assert_eq!(
            list("[12C16O,13C16O]").unwrap(),
            vec!["12C16O".to_string(), "13C16O".to_string()]
        );
    }

    #[test]
    fn test_list_trims_elements() {
        assert_eq!(
            list("[ a , b , c ]").unwrap(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_list_empty() {
        assert!(list("[]").unwrap().is_empty());
        assert!(list("[  ]").unwrap().is_empty());
    }

    #[test]
    fn test_list_rejects_unbracketed() {
        assert!(list("a,b,c").is_err());
        assert!(list("[a,b").is_err());
    }
}
