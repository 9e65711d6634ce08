//! The archive source seam between decoders and the extractor.

use std::io;
use std::io::Read;

use crate::types::EntryType;

/// A single decoded archive entry.
///
/// The byte stream borrows from the source that produced it and is only
/// valid until the source is advanced; the borrow checker enforces that
/// through the lifetime on [`EntrySource::next_entry`].
pub struct SourceEntry<'a> {
    name: String,
    entry_type: EntryType,
    reader: Box<dyn Read + 'a>,
}

impl<'a> SourceEntry<'a> {
    /// Creates a file entry backed by `reader`.
    pub fn file(name: impl Into<String>, reader: impl Read + 'a) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::File,
            reader: Box::new(reader),
        }
    }

    /// Creates a directory entry.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entry_type: EntryType::Directory,
            reader: Box::new(io::empty()),
        }
    }

    /// Creates a file entry whose contents cannot be read.
    ///
    /// Every read fails with `error`'s message, so the entry is still
    /// containment-checked and then fails as a per-entry write error.
    pub fn unreadable(name: impl Into<String>, error: &io::Error) -> Self {
        Self::file(
            name,
            UnreadableStream {
                message: error.to_string(),
            },
        )
    }

    /// Returns the entry name exactly as stored in the archive.
    ///
    /// The name is untrusted and may contain `..` or absolute segments.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entry type.
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Returns `true` for directory entries.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.entry_type.is_directory()
    }

    /// Returns the entry's byte stream. Directory entries read as empty.
    pub fn reader(&mut self) -> &mut (dyn Read + 'a) {
        &mut *self.reader
    }
}

struct UnreadableStream {
    message: String,
}

impl Read for UnreadableStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::InvalidData, self.message.clone()))
    }
}

impl std::fmt::Debug for SourceEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry")
            .field("name", &self.name)
            .field("entry_type", &self.entry_type)
            .finish_non_exhaustive()
    }
}

/// A sequence of archive entries, yielded one at a time in stored order.
///
/// Returning `Ok(None)` from the first call means the archive has no
/// entries, which the extractor treats as an invalid archive.
pub trait EntrySource {
    /// Advances to the next entry.
    ///
    /// # Errors
    ///
    /// Returns an error only if the source cannot advance at all. An entry
    /// that is listed but cannot be opened should be yielded with
    /// [`SourceEntry::unreadable`] so the scan can continue past it.
    fn next_entry(&mut self) -> io::Result<Option<SourceEntry<'_>>>;

    /// Returns the archive format name.
    fn format_name(&self) -> &str;
}
