//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::warn;

use crate::ExtractionConfig;
use crate::ExtractionOutcome;
use crate::extraction::ArchiveExtractor;
use crate::formats::TarEntrySource;
use crate::formats::ZipEntrySource;
use crate::formats::detect::ArchiveType;
use crate::formats::detect::detect_format;
use crate::gate::is_readable;

/// Extracts a ZIP file into `output_dir`, returning `true` on full success.
///
/// An absent archive path fails immediately. The output directory is
/// created if it does not exist (its parent must exist).
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::extract_zip;
/// use std::path::Path;
///
/// let ok = extract_zip(Some(Path::new("bundle.zip")), Path::new("/tmp/bundle"));
/// if !ok {
///     eprintln!("extraction failed, see log");
/// }
/// ```
pub fn extract_zip(zip_file: Option<&Path>, output_dir: &Path) -> bool {
    let Some(zip_file) = zip_file else {
        return false;
    };
    let extractor = ArchiveExtractor::default();
    extract_with(&extractor, zip_file, ArchiveType::Zip, output_dir).is_success()
}

/// Extracts an archive, detecting its format from the file extension.
///
/// Supports `.zip`, `.tar`, `.tar.gz` and `.tgz`.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::ExtractionConfig;
/// use fileguard_core::extract_archive;
/// use std::path::Path;
///
/// let config = ExtractionConfig::default();
/// let outcome = extract_archive(Some(Path::new("data.tar.gz")), Path::new("/tmp/data"), &config);
/// println!("extracted {} files", outcome.report().files_extracted);
/// ```
pub fn extract_archive(
    archive: Option<&Path>,
    output_dir: &Path,
    config: &ExtractionConfig,
) -> ExtractionOutcome {
    let Some(archive) = archive else {
        return ExtractionOutcome::failed();
    };

    let format = match detect_format(archive) {
        Ok(format) => format,
        Err(e) => {
            warn!(archive = %archive.display(), error = %e, "cannot extract archive");
            return ExtractionOutcome::failed();
        }
    };

    let extractor = ArchiveExtractor::new(config.clone());
    extract_with(&extractor, archive, format, output_dir)
}

fn extract_with(
    extractor: &ArchiveExtractor,
    archive: &Path,
    format: ArchiveType,
    output_dir: &Path,
) -> ExtractionOutcome {
    if !is_readable(Some(archive)) {
        return ExtractionOutcome::failed();
    }

    let file = match File::open(archive) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            warn!(archive = %archive.display(), error = %e, "failed to open archive");
            return ExtractionOutcome::failed();
        }
    };

    match format {
        ArchiveType::Zip => match ZipEntrySource::new(file) {
            Ok(mut source) => extractor.extract(&mut source, output_dir),
            Err(e) => {
                warn!(archive = %archive.display(), error = %e, "zip file was invalid");
                ExtractionOutcome::failed()
            }
        },
        ArchiveType::Tar => extract_tar(extractor, file, archive, output_dir),
        ArchiveType::TarGz => extract_tar(extractor, GzDecoder::new(file), archive, output_dir),
    }
}

fn extract_tar<R: Read>(
    extractor: &ArchiveExtractor,
    reader: R,
    archive: &Path,
    output_dir: &Path,
) -> ExtractionOutcome {
    let mut tar = tar::Archive::new(reader);
    match TarEntrySource::new(&mut tar) {
        Ok(mut source) => extractor.extract(&mut source, output_dir),
        Err(e) => {
            warn!(archive = %archive.display(), error = %e, "tar file was invalid");
            ExtractionOutcome::failed()
        }
    }
}
