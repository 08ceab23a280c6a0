//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version banner for `--version`.
pub fn version_string() -> String {
    format!("lane-runner {} ({})", BUILD_DATE, BUILD_COMMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_commit_format() {
        // 7 chars or "unknown"
        assert!(BUILD_COMMIT == "unknown" || BUILD_COMMIT.len() == 7);
    }

    #[test]
    fn test_version_string_mentions_date_and_commit() {
        let version = version_string();
        assert!(version.starts_with("lane-runner "));
        assert!(version.contains(BUILD_DATE));
        assert!(version.contains(BUILD_COMMIT));
    }
}
