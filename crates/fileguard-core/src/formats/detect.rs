//! Archive format detection.

use std::path::Path;

use crate::ExtractionError;
use crate::Result;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// ZIP archive.
    Zip,
}

/// Detects the archive type from a file path's extension.
///
/// # Errors
///
/// Returns `ExtractionError::UnsupportedFormat` if the extension is missing
/// or not recognized.
pub fn detect_format(path: &Path) -> Result<ArchiveType> {
    let unsupported = || ExtractionError::UnsupportedFormat {
        path: path.to_path_buf(),
    };

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(unsupported)?;

    match extension.to_ascii_lowercase().as_str() {
        "tar" => Ok(ArchiveType::Tar),
        "tgz" => Ok(ArchiveType::TarGz),
        "gz" if has_tar_stem(path) => Ok(ArchiveType::TarGz),
        "zip" => Ok(ArchiveType::Zip),
        _ => Err(unsupported()),
    }
}

fn has_tar_stem(path: &Path) -> bool {
    path.file_stem()
        .is_some_and(|stem| stem.to_string_lossy().to_ascii_lowercase().ends_with(".tar"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_tar() {
        let path = PathBuf::from("archive.tar");
        assert_eq!(detect_format(&path).unwrap(), ArchiveType::Tar);
    }

    #[test]
    fn test_detect_tar_gz() {
        let path = PathBuf::from("archive.tar.gz");
        assert_eq!(detect_format(&path).unwrap(), ArchiveType::TarGz);

        let path2 = PathBuf::from("archive.tgz");
        assert_eq!(detect_format(&path2).unwrap(), ArchiveType::TarGz);
    }

    #[test]
    fn test_plain_gz_unsupported() {
        let path = PathBuf::from("notes.txt.gz");
        assert!(matches!(
            detect_format(&path),
            Err(ExtractionError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_detect_zip_case_insensitive() {
        assert_eq!(detect_format(Path::new("bundle.zip")).unwrap(), ArchiveType::Zip);
        assert_eq!(detect_format(Path::new("BUNDLE.ZIP")).unwrap(), ArchiveType::Zip);
        assert_eq!(
            detect_format(Path::new("Archive.TAR.GZ")).unwrap(),
            ArchiveType::TarGz
        );
    }

    #[test]
    fn test_detect_unsupported() {
        assert!(detect_format(Path::new("archive.rar")).is_err());
        assert!(detect_format(Path::new("no_extension")).is_err());
    }
}
