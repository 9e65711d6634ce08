//! Validated destination directory type.

use std::ffi::OsString;
use std::io;
use std::path::MAIN_SEPARATOR_STR;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use super::canonical::canonicalize_lenient;
use crate::ExtractionError;
use crate::Result;

/// A destination directory for archive extraction.
///
/// Holds both the path as the caller spelled it, which entry names are
/// appended to, and its canonical form, which every candidate output path is
/// compared against.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::types::DestDir;
/// use std::path::Path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create(Path::new("/tmp/extraction"), false)?;
/// let candidate = dest.entry_path("docs/readme.txt");
/// assert!(dest.contains(&candidate)?);
/// assert!(!dest.contains(&dest.entry_path("../../etc/passwd"))?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir {
    original: PathBuf,
    canonical: PathBuf,
}

impl DestDir {
    /// Wraps an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::DestinationUnavailable` if the path does not
    /// exist, is not a directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let original = path.into();
        let unavailable = |source: io::Error| ExtractionError::DestinationUnavailable {
            path: original.clone(),
            source,
        };

        if !original.is_dir() {
            return Err(unavailable(io::Error::new(
                io::ErrorKind::NotFound,
                format!("not a directory: {}", original.display()),
            )));
        }

        let canonical = original.canonicalize().map_err(unavailable)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Creates the directory if it is absent, then wraps it.
    ///
    /// Only the last component is created unless `create_parents` is set.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::DestinationUnavailable` if the directory
    /// cannot be created or validated.
    pub fn create(path: &Path, create_parents: bool) -> Result<Self> {
        if !path.exists() {
            let created = if create_parents {
                std::fs::create_dir_all(path)
            } else {
                std::fs::create_dir(path)
            };
            created.map_err(|source| ExtractionError::DestinationUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            debug!(path = %path.display(), "created output directory");
        }

        Self::new(path)
    }

    /// Returns the path as supplied by the caller.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.original
    }

    /// Returns the canonical absolute path.
    #[inline]
    #[must_use]
    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    /// Builds the candidate output path for an archive entry.
    ///
    /// The name is appended verbatim after a separator; it is neither joined
    /// with [`Path::join`] nor cleaned, so containment must be checked with
    /// [`DestDir::contains`] before the path is used.
    #[must_use]
    pub fn entry_path(&self, name: &str) -> PathBuf {
        let mut joined = OsString::from(self.original.as_os_str());
        joined.push(MAIN_SEPARATOR_STR);
        joined.push(name);
        PathBuf::from(joined)
    }

    /// Returns `true` if `candidate` resolves inside this directory.
    ///
    /// The comparison is component-wise, so `/out-evil` is not inside `/out`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the candidate cannot be resolved.
    pub fn contains(&self, candidate: &Path) -> io::Result<bool> {
        Ok(canonicalize_lenient(candidate)?.starts_with(&self.canonical))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dest_dir_valid() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).expect("dest should be valid");
        assert!(dest.canonical().is_absolute());
        assert_eq!(dest.as_path(), temp.path());
    }

    #[test]
    fn test_dest_dir_nonexistent() {
        let result = DestDir::new("/nonexistent/directory/that/does/not/exist");
        assert!(matches!(
            result,
            Err(ExtractionError::DestinationUnavailable { .. })
        ));
    }

    #[test]
    fn test_dest_dir_not_a_directory() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let file_path = temp.path().join("file.txt");
        fs::write(&file_path, "test").expect("failed to write file");

        assert!(DestDir::new(file_path).is_err());
    }

    #[test]
    fn test_create_single_level() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("out");

        let dest = DestDir::create(&path, false).expect("should create");
        assert!(path.is_dir());
        assert_eq!(dest.canonical(), path.canonicalize().unwrap());
    }

    #[test]
    fn test_create_missing_parent_fails_without_flag() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = temp.path().join("a").join("out");

        assert!(DestDir::create(&path, false).is_err());
        assert!(!path.exists());

        DestDir::create(&path, true).expect("should create with parents");
        assert!(path.is_dir());
    }

    #[test]
    fn test_entry_path_is_verbatim() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).unwrap();

        let path = dest.entry_path("../evil");
        let expected = format!("{}{MAIN_SEPARATOR_STR}../evil", temp.path().display());
        assert_eq!(path, PathBuf::from(expected));
    }

    #[test]
    fn test_contains() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        let dest = DestDir::new(&out).unwrap();

        assert!(dest.contains(&dest.entry_path("a/b/c.txt")).unwrap());
        assert!(dest.contains(&dest.entry_path("a/../b.txt")).unwrap());
        assert!(dest.contains(&dest.entry_path("")).unwrap());
        assert!(!dest.contains(&dest.entry_path("../evil")).unwrap());
        assert!(!dest.contains(&dest.entry_path("a/../../evil")).unwrap());
    }

    #[test]
    fn test_sibling_with_common_prefix_not_contained() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        let dest = DestDir::new(&out).unwrap();

        assert!(!dest.contains(&dest.entry_path("../out-evil/x")).unwrap());
    }

    #[test]
    #[cfg(unix)]
    fn test_dest_dir_with_symlink() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().expect("failed to create temp dir");
        let real_dir = temp.path().join("real");
        fs::create_dir(&real_dir).unwrap();
        let link = temp.path().join("link");
        symlink(&real_dir, &link).unwrap();

        let dest = DestDir::new(&link).expect("should create from symlink");
        assert_eq!(dest.canonical(), real_dir.canonicalize().unwrap());
        assert!(dest.contains(&dest.entry_path("file.txt")).unwrap());
    }
}
