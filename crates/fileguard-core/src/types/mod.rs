//! Path and entry types used by extraction.
//!
//! `DestDir` pairs the caller's destination path with its canonical form so
//! that every candidate output path is compared against a symlink-free root.

pub mod canonical;
pub mod dest_dir;
pub mod entry_type;

pub use canonical::canonicalize_lenient;
pub use dest_dir::DestDir;
pub use entry_type::EntryType;
