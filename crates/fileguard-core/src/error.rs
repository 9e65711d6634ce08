//! Error types for file and archive operations.
//!
//! Public operations collapse these into `bool`/`Option` results plus a log
//! line. The enum exists so the extraction loop can tell an aborting failure
//! (an entry escaping the destination) from a degrading one (a single entry
//! that could not be written).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Errors that can occur while reading, writing or extracting files.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation on the archive source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is missing, not a regular file, or not readable.
    #[error("file is not readable: {path}")]
    NotReadable {
        /// The rejected path.
        path: PathBuf,
    },

    /// Destination file could not be opened, created, or fully written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The destination file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Byte count overflowed while copying.
    #[error("byte count overflow while copying")]
    CountOverflow,

    /// Archive format is unsupported or unrecognized.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// The archive path.
        path: PathBuf,
    },

    /// Archive is empty or corrupted.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive entry resolves outside the destination directory.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The entry name as stored in the archive.
        path: PathBuf,
    },

    /// Destination directory does not exist and could not be created.
    #[error("destination directory unavailable: {path}: {source}")]
    DestinationUnavailable {
        /// The destination directory.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Parent directory of a file entry could not be created.
    #[error("could not create parent directory for {path}: {source}")]
    ParentDirectory {
        /// The file entry's output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Directory entry could not be created.
    #[error("could not create directory {path}: {source}")]
    EntryDirectory {
        /// The directory entry's output path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ExtractionError {
    /// Returns `true` if this error must stop a multi-entry extraction.
    ///
    /// Failures to write or create a single entry only mark that entry as
    /// failed; everything else ends the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileguard_core::ExtractionError;
    /// use std::path::PathBuf;
    ///
    /// let err = ExtractionError::PathTraversal {
    ///     path: PathBuf::from("../../evil"),
    /// };
    /// assert!(err.aborts_extraction());
    ///
    /// let err = ExtractionError::Write {
    ///     path: PathBuf::from("out/file.txt"),
    ///     source: std::io::Error::other("disk full"),
    /// };
    /// assert!(!err.aborts_extraction());
    /// ```
    #[must_use]
    pub const fn aborts_extraction(&self) -> bool {
        !matches!(
            self,
            Self::Write { .. } | Self::EntryDirectory { .. } | Self::CountOverflow
        )
    }

    /// Returns `true` if this error represents a containment violation.
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(self, Self::PathTraversal { .. })
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileguard_core::ExtractionError;
    ///
    /// let err = ExtractionError::InvalidArchive("no entries".to_string());
    /// assert_eq!(err.context(), Some("no entries"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            _ => None,
        }
    }
}
