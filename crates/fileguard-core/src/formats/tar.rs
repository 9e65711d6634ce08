//! TAR archive entry source.

use std::io;
use std::io::Read;

use tracing::warn;

use super::traits::EntrySource;
use super::traits::SourceEntry;

/// Yields the regular-file and directory entries of a TAR stream in order.
///
/// Links and special files are skipped with a warning, since extraction only
/// knows how to create directories and write file bytes. Gzip-compressed
/// archives are handled by wrapping the reader in
/// `flate2::read::GzDecoder` before building the `tar::Archive`.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::formats::{EntrySource, TarEntrySource};
/// use std::fs::File;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut archive = tar::Archive::new(File::open("bundle.tar")?);
/// let mut source = TarEntrySource::new(&mut archive)?;
/// while let Some(entry) = source.next_entry()? {
///     println!("{}", entry.name());
/// }
/// # Ok(())
/// # }
/// ```
pub struct TarEntrySource<'a, R: 'a + Read> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: 'a + Read> TarEntrySource<'a, R> {
    /// Starts iterating the entries of `archive`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive has already been partially read.
    pub fn new(archive: &'a mut tar::Archive<R>) -> io::Result<Self> {
        Ok(Self {
            entries: archive.entries()?,
        })
    }
}

impl<'a, R: 'a + Read> EntrySource for TarEntrySource<'a, R> {
    fn next_entry(&mut self) -> io::Result<Option<SourceEntry<'_>>> {
        for entry in self.entries.by_ref() {
            let entry = entry?;
            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            let kind = entry.header().entry_type();

            if kind.is_dir() {
                return Ok(Some(SourceEntry::directory(name)));
            }
            if kind.is_file() || kind.is_contiguous() {
                return Ok(Some(SourceEntry::file(name, entry)));
            }
            warn!(name = %name, entry_type = ?kind, "skipping unsupported TAR entry");
        }
        Ok(None)
    }

    fn format_name(&self) -> &str {
        "tar"
    }
}
