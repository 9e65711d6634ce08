//! Archive entry type enumeration.

/// Type of entry yielded by an archive source.
///
/// Sources report only what extraction acts on: a directory to create or a
/// file whose bytes are streamed to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry with a byte stream.
    File,

    /// Directory entry.
    Directory,
}

impl EntryType {
    /// Maps a directory flag to an entry type.
    #[must_use]
    pub const fn from_is_dir(is_dir: bool) -> Self {
        if is_dir { Self::Directory } else { Self::File }
    }

    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_file() {
        let entry = EntryType::File;
        assert!(entry.is_file());
        assert!(!entry.is_directory());
    }

    #[test]
    fn test_entry_type_directory() {
        let entry = EntryType::Directory;
        assert!(!entry.is_file());
        assert!(entry.is_directory());
    }

    #[test]
    fn test_from_is_dir() {
        assert_eq!(EntryType::from_is_dir(true), EntryType::Directory);
        assert_eq!(EntryType::from_is_dir(false), EntryType::File);
    }
}
