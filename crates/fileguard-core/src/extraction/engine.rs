//! Core extraction engine.
//!
//! Entries are processed strictly in source order. Each entry's output path
//! is built by appending the raw entry name to the destination and is then
//! resolved to canonical form; if that form is not under the canonical
//! destination the whole run stops before anything is written for the
//! entry. Other per-entry failures only clear the success flag.

use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::ExtractionOutcome;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::WriteMode;
use crate::copy::try_write_stream_to_file;
use crate::formats::EntrySource;
use crate::formats::SourceEntry;
use crate::types::DestDir;

/// Extracts archive entries into a destination directory with containment
/// checks.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::ExtractionConfig;
/// use fileguard_core::extraction::ArchiveExtractor;
/// use fileguard_core::formats::MemoryEntrySource;
/// use std::path::Path;
///
/// let mut source = MemoryEntrySource::new().with_file("docs/readme.txt", b"hi".to_vec());
/// let extractor = ArchiveExtractor::new(ExtractionConfig::default());
/// let outcome = extractor.extract(&mut source, Path::new("/tmp/output"));
/// assert!(outcome.is_success());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveExtractor {
    config: ExtractionConfig,
}

impl ArchiveExtractor {
    /// Creates a new extractor with the given configuration.
    #[must_use]
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// Returns the extractor configuration.
    #[must_use]
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts every entry of `source` under `dest`.
    ///
    /// The destination is created if it does not exist. The outcome is
    /// successful only if every entry was extracted. An entry that resolves
    /// outside `dest`, a file entry whose parent directory cannot be created,
    /// an empty source, or a decoding error stops the run; a single entry
    /// that cannot be written is logged and skipped. Files written before a
    /// failure are left on disk.
    pub fn extract(&self, source: &mut dyn EntrySource, dest: &Path) -> ExtractionOutcome {
        let start = Instant::now();
        let mut report = ExtractionReport::new();

        let success = match self.extract_entries(source, dest, &mut report) {
            Ok(success) => success,
            Err(e) => {
                log_abort(&e, dest);
                report.aborted = true;
                false
            }
        };

        report.duration = start.elapsed();
        info!(
            dest = %dest.display(),
            format = source.format_name(),
            success,
            files = report.files_extracted,
            directories = report.directories_created,
            failed = report.entries_failed,
            "extraction finished"
        );
        ExtractionOutcome::new(success, report)
    }

    fn extract_entries(
        &self,
        source: &mut dyn EntrySource,
        dest: &Path,
        report: &mut ExtractionReport,
    ) -> Result<bool> {
        let dest = DestDir::create(dest, self.config.create_missing_parents)?;
        let mut buffer = CopyBuffer::with_capacity(self.config.buffer_size);
        let mut extracted = true;
        let mut first = true;

        loop {
            let Some(mut entry) = source.next_entry()? else {
                if first {
                    return Err(ExtractionError::InvalidArchive(
                        "archive contains no entries".to_string(),
                    ));
                }
                break;
            };
            first = false;

            match extract_entry(&mut entry, &dest, &mut buffer, report) {
                Ok(()) => {}
                Err(e) if !e.aborts_extraction() => {
                    warn!(entry = entry.name(), error = %e, "failed to extract entry");
                    report.entries_failed += 1;
                    report.add_warning(e.to_string());
                    extracted = false;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(extracted)
    }
}

fn extract_entry(
    entry: &mut SourceEntry<'_>,
    dest: &DestDir,
    buffer: &mut CopyBuffer,
    report: &mut ExtractionReport,
) -> Result<()> {
    let output = dest.entry_path(entry.name());

    if !dest.contains(&output)? {
        return Err(ExtractionError::PathTraversal {
            path: PathBuf::from(entry.name()),
        });
    }

    if entry.is_dir() {
        if !output.exists() {
            create_dir_all(&output).map_err(|source| ExtractionError::EntryDirectory {
                path: output.clone(),
                source,
            })?;
            report.directories_created += 1;
        }
        return Ok(());
    }

    ensure_parent(&output)?;
    let written = try_write_stream_to_file(&output, entry.reader(), WriteMode::Truncate, buffer)?;
    debug!(path = %output.display(), bytes = written, "extracted file");

    report.files_extracted += 1;
    report.bytes_written = report.bytes_written.saturating_add(written);
    Ok(())
}

fn ensure_parent(output: &Path) -> Result<()> {
    let Some(parent) = output.parent() else {
        return Err(ExtractionError::ParentDirectory {
            path: output.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no parent"),
        });
    };

    if parent.exists() {
        return Ok(());
    }
    create_dir_all(parent).map_err(|source| ExtractionError::ParentDirectory {
        path: output.to_path_buf(),
        source,
    })
}

fn log_abort(err: &ExtractionError, dest: &Path) {
    match err {
        ExtractionError::PathTraversal { path } => error!(
            entry = %path.display(),
            "the archive contained an invalid path; verify that it is formatted correctly and has not been tampered with"
        ),
        ExtractionError::DestinationUnavailable { .. } => {
            warn!(dest = %dest.display(), error = %err, "could not create the output directory");
        }
        ExtractionError::ParentDirectory { .. } => {
            warn!(error = %err, "could not extract the file");
        }
        ExtractionError::InvalidArchive(_) => warn!(error = %err, "archive was invalid"),
        _ => error!(error = %err, "extraction failed"),
    }
}
