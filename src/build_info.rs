//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `trex-runner <version> (<commit> <date>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!(
        "trex-runner {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_build_commit_format() {
        // Should be 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_line_mentions_build() {
        let line = version_line();
        assert!(line.starts_with("trex-runner "));
        assert!(line.contains(BUILD_COMMIT));
        assert!(line.contains(BUILD_DATE));
    }
}
