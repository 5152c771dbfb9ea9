use crate::ConfigError;

/// Validates the file name sent alongside every chunk.
///
/// The receiver uses it to name the merged file, so it must be a single,
/// plain path component.
///
/// Rejects:
/// - Empty or whitespace-only names
/// - `.` and `..`
/// - Path separators (`/` or `\`)
/// - NUL bytes
pub fn validate_file_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::InvalidFileName("empty file name".into()));
    }

    if name == "." || name == ".." {
        return Err(ConfigError::InvalidFileName(format!(
            "not a file name: {name}"
        )));
    }

    if name.contains(['/', '\\']) {
        return Err(ConfigError::InvalidFileName(format!(
            "path separators not allowed: {name}"
        )));
    }

    if name.contains('\0') {
        return Err(ConfigError::InvalidFileName(
            "NUL byte not allowed".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("   ").is_err());
    }

    #[test]
    fn rejects_dot_entries() {
        assert!(validate_file_name(".").is_err());
        assert!(validate_file_name("..").is_err());
    }

    #[test]
    fn rejects_separators() {
        assert!(validate_file_name("dir/video.mp4").is_err());
        assert!(validate_file_name("..\\evil.exe").is_err());
    }

    #[test]
    fn rejects_nul() {
        assert!(validate_file_name("a\0b").is_err());
    }

    #[test]
    fn accepts_plain_names() {
        assert!(validate_file_name("abc.mp4").is_ok());
        assert!(validate_file_name(".hidden").is_ok());
        assert!(validate_file_name("My Holiday (2).MOV").is_ok());
        assert!(validate_file_name("no_extension").is_ok());
    }
}
