//! Archive entry sources.
//!
//! Decoding is delegated to the `zip` and `tar` crates; these adapters only
//! present their entries as an [`EntrySource`] for the extractor.

pub mod detect;
pub mod memory;
pub mod tar;
pub mod traits;
pub mod zip;

pub use memory::MemoryEntrySource;
pub use tar::TarEntrySource;
pub use traits::EntrySource;
pub use traits::SourceEntry;
pub use zip::ZipEntrySource;
