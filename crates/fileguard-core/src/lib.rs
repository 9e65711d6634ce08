//! Guarded file-system helpers and path-traversal-safe archive extraction.
//!
//! `fileguard-core` provides a small set of file utilities that check access
//! before touching the file system, plus an archive extractor that refuses to
//! write any entry whose resolved path lands outside the destination
//! directory (the "zip slip" attack).
//!
//! # Examples
//!
//! ```no_run
//! use fileguard_core::extract_zip;
//! use fileguard_core::sanitize::remove_relative_path;
//! use std::path::Path;
//!
//! assert_eq!(remove_relative_path("/db/../../other"), "db_other");
//!
//! if !extract_zip(Some(Path::new("upload.zip")), Path::new("/srv/unpacked")) {
//!     eprintln!("rejected archive");
//! }
//! ```
//!
//! Failures are reported as `false` or as an [`ExtractionOutcome`]; the
//! reason is emitted through `tracing`.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod gate;
pub mod reader;
pub mod report;
pub mod sanitize;
pub mod types;

#[doc(hidden)]
pub mod test_utils;

pub use api::extract_archive;
pub use api::extract_zip;
pub use config::ExtractionConfig;
pub use copy::CopyBuffer;
pub use copy::WriteMode;
pub use copy::copy_file;
pub use copy::write_stream_to_file;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::ArchiveExtractor;
pub use gate::is_readable;
pub use gate::is_writable_directory;
pub use reader::read_as_string;
pub use report::ExtractionOutcome;
pub use report::ExtractionReport;
pub use sanitize::remove_relative_path;

pub use types::DestDir;
pub use types::EntryType;
