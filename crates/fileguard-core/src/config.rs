//! Extraction configuration.

use crate::copy::DEFAULT_BUFFER_SIZE;

/// Configuration for archive extraction.
///
/// Containment checking is not configurable; these knobs only affect how
/// bytes are moved and how the destination root is prepared.
///
/// # Examples
///
/// ```
/// use fileguard_core::ExtractionConfig;
///
/// let config = ExtractionConfig {
///     create_missing_parents: true,
///     ..Default::default()
/// };
/// assert_eq!(config.buffer_size, 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Chunk size in bytes used when streaming entries to disk.
    pub buffer_size: usize,

    /// Create missing ancestors of the destination directory.
    ///
    /// When `false` only the destination itself is created, and extraction
    /// fails if its parent does not exist.
    pub create_missing_parents: bool,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `buffer_size`: 4096 bytes
    /// - `create_missing_parents`: false
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            create_missing_parents: false,
        }
    }
}

impl ExtractionConfig {
    /// Returns a copy of this configuration with the given chunk size.
    ///
    /// A size of zero is replaced by the default.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = if size == 0 { DEFAULT_BUFFER_SIZE } else { size };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.buffer_size, 4096);
        assert!(!config.create_missing_parents);
    }

    #[test]
    fn test_with_buffer_size() {
        let config = ExtractionConfig::default().with_buffer_size(64 * 1024);
        assert_eq!(config.buffer_size, 64 * 1024);

        let config = ExtractionConfig::default().with_buffer_size(0);
        assert_eq!(config.buffer_size, DEFAULT_BUFFER_SIZE);
    }
}
