//! Whole-file text reads.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use crate::gate::is_readable;

/// Reads the file at `path` as UTF-8 text.
///
/// Lines are concatenated without their terminators: `\n`, `\r\n` and a lone
/// `\r` are all dropped, so `"a\nb\r\nc"` reads as `"abc"`.
///
/// Returns `None` if the path fails [`is_readable`], if reading fails, or if
/// the content is not valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::reader::read_as_string;
/// use std::path::Path;
///
/// if let Some(json) = read_as_string(Some(Path::new("cache.json"))) {
///     println!("{json}");
/// }
/// ```
#[must_use]
pub fn read_as_string(path: Option<&Path>) -> Option<String> {
    if !is_readable(path) {
        debug!(path = ?path, "failed to read file");
        return None;
    }
    let path = path?;

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to open file");
            return None;
        }
    };

    let mut content = String::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => content.extend(line.split('\r')),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read file contents");
                return None;
            }
        }
    }

    Some(content)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_single_line() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("data.json");
        fs::write(&path, r#"{"key":"value"}"#).unwrap();

        assert_eq!(
            read_as_string(Some(&path)).as_deref(),
            Some(r#"{"key":"value"}"#)
        );
    }

    #[test]
    fn test_line_terminators_dropped() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("lines.txt");
        fs::write(&path, "first\nsecond\r\nthird\rfourth\n").unwrap();

        assert_eq!(
            read_as_string(Some(&path)).as_deref(),
            Some("firstsecondthirdfourth")
        );
    }

    #[test]
    fn test_empty_file() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        assert_eq!(read_as_string(Some(&path)).as_deref(), Some(""));
    }

    #[test]
    fn test_missing_and_absent() {
        let temp = TempDir::new().expect("failed to create temp dir");
        assert!(read_as_string(Some(&temp.path().join("missing.txt"))).is_none());
        assert!(read_as_string(None).is_none());
    }

    #[test]
    fn test_directory_is_unreadable() {
        let temp = TempDir::new().expect("failed to create temp dir");
        assert!(read_as_string(Some(temp.path())).is_none());
    }

    #[test]
    fn test_invalid_utf8() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("binary.bin");
        fs::write(&path, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

        assert!(read_as_string(Some(&path)).is_none());
    }

    #[test]
    fn test_multibyte_text() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("unicode.txt");
        fs::write(&path, "héllo\nwörld").unwrap();

        assert_eq!(read_as_string(Some(&path)).as_deref(), Some("héllowörld"));
    }
}
