//! In-memory entry source.

use std::io;

use super::traits::EntrySource;
use super::traits::SourceEntry;
use crate::types::EntryType;

#[derive(Debug, Clone)]
struct MemoryEntry {
    name: String,
    entry_type: EntryType,
    data: Vec<u8>,
}

/// Serves entries that were decoded elsewhere and are held in memory.
///
/// Useful for archive decoders that live outside this crate: decode into a
/// `MemoryEntrySource`, then hand it to the extractor for containment
/// checking and writing.
///
/// # Examples
///
/// ```
/// use fileguard_core::formats::{EntrySource, MemoryEntrySource};
///
/// let mut source = MemoryEntrySource::new()
///     .with_directory("assets/")
///     .with_file("assets/logo.txt", b"fileguard".to_vec());
/// assert_eq!(source.len(), 2);
/// assert!(source.next_entry().unwrap().unwrap().is_dir());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryEntrySource {
    entries: Vec<MemoryEntry>,
    cursor: usize,
}

impl MemoryEntrySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file entry.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.entries.push(MemoryEntry {
            name: name.into(),
            entry_type: EntryType::File,
            data,
        });
        self
    }

    /// Appends a directory entry.
    #[must_use]
    pub fn with_directory(mut self, name: impl Into<String>) -> Self {
        self.entries.push(MemoryEntry {
            name: name.into(),
            entry_type: EntryType::Directory,
            data: Vec::new(),
        });
        self
    }

    /// Returns the total number of entries, served or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the source holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewinds to the first entry.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

impl EntrySource for MemoryEntrySource {
    fn next_entry(&mut self) -> io::Result<Option<SourceEntry<'_>>> {
        let Some(entry) = self.entries.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        Ok(Some(match entry.entry_type {
            EntryType::Directory => SourceEntry::directory(entry.name.clone()),
            EntryType::File => SourceEntry::file(entry.name.clone(), entry.data.as_slice()),
        }))
    }

    fn format_name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serves_in_insertion_order() {
        let mut source = MemoryEntrySource::new()
            .with_file("b.txt", b"bee".to_vec())
            .with_directory("a/");

        let mut first = source.next_entry().unwrap().unwrap();
        assert_eq!(first.name(), "b.txt");
        let mut data = Vec::new();
        first.reader().read_to_end(&mut data).unwrap();
        drop(first);
        assert_eq!(data, b"bee");

        assert!(source.next_entry().unwrap().unwrap().is_dir());
        assert!(source.next_entry().unwrap().is_none());
    }

    #[test]
    fn test_rewind() {
        let mut source = MemoryEntrySource::new().with_file("x", Vec::new());
        assert!(source.next_entry().unwrap().is_some());
        assert!(source.next_entry().unwrap().is_none());

        source.rewind();
        assert!(source.next_entry().unwrap().is_some());
    }

    #[test]
    fn test_empty() {
        let mut source = MemoryEntrySource::new();
        assert!(source.is_empty());
        assert_eq!(source.format_name(), "memory");
        assert!(source.next_entry().unwrap().is_none());
    }
}
