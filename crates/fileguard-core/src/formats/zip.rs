//! ZIP archive entry source.

use std::io;
use std::io::Read;
use std::io::Seek;

use tracing::warn;
use zip::ZipArchive;

use super::traits::EntrySource;
use super::traits::SourceEntry;
use crate::ExtractionError;
use crate::Result;
use crate::types::EntryType;

/// Yields the entries of a ZIP archive in central-directory order.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::formats::{EntrySource, ZipEntrySource};
/// use std::fs::File;
/// use std::io::BufReader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = BufReader::new(File::open("bundle.zip")?);
/// let mut source = ZipEntrySource::new(file)?;
/// while let Some(entry) = source.next_entry()? {
///     println!("{}", entry.name());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ZipEntrySource<R: Read + Seek> {
    archive: ZipArchive<R>,
    next_index: usize,
}

impl<R: Read + Seek> ZipEntrySource<R> {
    /// Reads the central directory of the archive.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::InvalidArchive` if `reader` is not a ZIP
    /// archive.
    pub fn new(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)
            .map_err(|e| ExtractionError::InvalidArchive(format!("failed to read ZIP: {e}")))?;
        Ok(Self {
            archive,
            next_index: 0,
        })
    }

    /// Returns the number of entries in the archive.
    #[must_use]
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

impl<R: Read + Seek> EntrySource for ZipEntrySource<R> {
    fn next_entry(&mut self) -> io::Result<Option<SourceEntry<'_>>> {
        if self.next_index >= self.archive.len() {
            return Ok(None);
        }
        let index = self.next_index;
        self.next_index += 1;

        let name = self
            .archive
            .name_for_index(index)
            .unwrap_or_default()
            .to_string();

        let file = match self.archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                warn!(entry = %name, error = %e, "cannot open zip entry");
                return Ok(Some(if name.ends_with('/') {
                    SourceEntry::directory(name)
                } else {
                    SourceEntry::unreadable(name, &io::Error::other(e))
                }));
            }
        };

        Ok(Some(match EntryType::from_is_dir(file.is_dir()) {
            EntryType::Directory => SourceEntry::directory(name),
            EntryType::File => SourceEntry::file(name, file),
        }))
    }

    fn format_name(&self) -> &str {
        "zip"
    }
}
