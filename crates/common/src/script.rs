use crate::error::ScenescribeError;
use std::path::Path;
use tracing::{debug, warn};

/// Read a transcript file as UTF-8 text
///
/// Missing, unreadable and non-UTF-8 files all surface as
/// [`ScenescribeError::NotFound`]. Windows line endings are normalized to
/// `\n` so paragraph boundaries are plain blank lines.
pub fn read_script(path: &Path) -> Result<String, ScenescribeError> {
    let bytes = std::fs::read(path).map_err(|e| {
        warn!("File not found: {} ({})", path.display(), e);
        ScenescribeError::not_found(path.display().to_string())
    })?;

    let text = String::from_utf8(bytes).map_err(|e| {
        warn!("File is not valid UTF-8: {} ({})", path.display(), e);
        ScenescribeError::not_found(format!("{} (not valid UTF-8)", path.display()))
    })?;

    debug!("Read script {} - {} chars", path.display(), text.chars().count());

    if text.contains("\r\n") {
        return Ok(text.replace("\r\n", "\n"));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Iron_Man.srt");
        std::fs::write(&path, "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();

        let text = read_script(&path).unwrap();
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_script(&dir.path().join("missing.srt")).unwrap_err();
        assert!(matches!(err, ScenescribeError::NotFound(_)));
    }

    #[test]
    fn test_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.srt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let err = read_script(&path).unwrap_err();
        assert!(matches!(err, ScenescribeError::NotFound(_)));
    }

    #[test]
    fn test_crlf_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("windows.srt");
        std::fs::write(&path, "first\r\n\r\nsecond\r\n").unwrap();

        assert_eq!(read_script(&path).unwrap(), "first\n\nsecond\n");
    }
}
