//! Extraction operation reporting.

use std::time::Duration;

/// Statistics gathered during an extraction run.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of file entries written.
    pub files_extracted: usize,

    /// Number of directory entries that created a new directory.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Number of entries that failed without stopping the run.
    pub entries_failed: usize,

    /// Whether the run was stopped before the source was exhausted.
    pub aborted: bool,

    /// Duration of the extraction operation.
    pub duration: Duration,

    /// Warnings generated during extraction.
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns total number of entries that were extracted.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of an extraction: a success flag plus run statistics.
///
/// Success means every entry was contained in the destination and was
/// written or created. The reason for a failure is only available from the
/// log stream.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ExtractionOutcome {
    success: bool,
    report: ExtractionReport,
}

impl ExtractionOutcome {
    /// Creates an outcome from a success flag and report.
    pub const fn new(success: bool, report: ExtractionReport) -> Self {
        Self { success, report }
    }

    /// Creates a failed outcome for a run that never started.
    pub fn failed() -> Self {
        Self::new(
            false,
            ExtractionReport {
                aborted: true,
                ..ExtractionReport::default()
            },
        )
    }

    /// Returns `true` if the extraction fully succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the run statistics.
    #[must_use]
    pub const fn report(&self) -> &ExtractionReport {
        &self.report
    }

    /// Converts into the run statistics.
    #[must_use]
    pub fn into_report(self) -> ExtractionReport {
        self.report
    }
}

impl From<ExtractionOutcome> for bool {
    fn from(outcome: ExtractionOutcome) -> Self {
        outcome.success
    }
}
