//! Versioning for the provenance snapshot format.

/// Schema version written into new provenance snapshots.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// Oldest snapshot schema version this build can still read.
pub const MIN_COMPATIBLE_VERSION: &str = "1.0.0";

/// Check whether a snapshot written at `version` can be read by this build.
///
/// Compatibility is judged on the major component only; minor and patch
/// bumps are additive.
pub fn is_compatible(version: &str) -> bool {
    match (major(version), major(SNAPSHOT_SCHEMA_VERSION)) {
        (Some(found), Some(current)) => found == current,
        _ => false,
    }
}

fn major(version: &str) -> Option<u32> {
    version.split('.').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_is_compatible() {
        assert!(is_compatible(SNAPSHOT_SCHEMA_VERSION));
        assert!(is_compatible(MIN_COMPATIBLE_VERSION));
    }

    #[test]
    fn test_minor_bump_is_compatible() {
        assert!(is_compatible("1.9.3"));
    }

    #[test]
    fn test_major_bump_is_not_compatible() {
        assert!(!is_compatible("2.0.0"));
        assert!(!is_compatible("0.1.0"));
    }

    #[test]
    fn test_garbage_is_not_compatible() {
        assert!(!is_compatible(""));
        assert!(!is_compatible("not-a-version"));
    }
}
