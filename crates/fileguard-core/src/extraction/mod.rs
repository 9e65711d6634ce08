//! Archive extraction with zip-slip containment.

pub mod engine;

pub use engine::ArchiveExtractor;
