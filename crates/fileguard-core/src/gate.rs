//! Readability and writability predicates.
//!
//! These checks never open the file, so a negative answer cannot leak a
//! descriptor. They are advisory: the filesystem can change between the
//! check and the subsequent open.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use tracing::warn;

/// Access mode passed to [`has_access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

/// Returns `true` if `path` is an existing regular file the current process
/// may read.
///
/// A missing path, a directory, or a path whose metadata lookup is denied
/// all return `false`.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::gate::is_readable;
/// use std::path::Path;
///
/// if is_readable(Some(Path::new("config.json"))) {
///     // safe to open
/// }
/// assert!(!is_readable(None));
/// ```
#[must_use]
pub fn is_readable(path: Option<&Path>) -> bool {
    let Some(path) = path else {
        warn!("file does not exist or doesn't have read permission: <none>");
        return false;
    };

    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            debug!(path = %path.display(), error = %e, "failed to read file");
            return false;
        }
        Err(_) => {
            warn!(
                path = %path.display(),
                "file does not exist or doesn't have read permission"
            );
            return false;
        }
    };

    if !metadata.is_file() || !has_access(path, Access::Read) {
        warn!(
            path = %path.display(),
            "file does not exist or doesn't have read permission"
        );
        return false;
    }

    true
}

/// Returns `true` if `dir` is an existing directory the current process may
/// write into.
#[must_use]
pub fn is_writable_directory(dir: Option<&Path>) -> bool {
    dir.is_some_and(|dir| dir.is_dir() && has_access(dir, Access::Write))
}

/// Checks effective permissions with `access(2)`.
#[cfg(unix)]
fn has_access(path: &Path, access: Access) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        debug!(path = %path.display(), "path contains null byte");
        return false;
    };

    let mode = match access {
        Access::Read => libc::R_OK,
        Access::Write => libc::W_OK,
    };

    // SAFETY: access() only reads the NUL-terminated string, which outlives
    // the call.
    #[allow(unsafe_code)]
    let result = unsafe { libc::access(c_path.as_ptr(), mode) };

    result == 0
}

/// Falls back to the read-only attribute where `access(2)` is unavailable.
#[cfg(not(unix))]
fn has_access(path: &Path, access: Access) -> bool {
    match access {
        Access::Read => std::fs::metadata(path).is_ok(),
        Access::Write => std::fs::metadata(path).is_ok_and(|m| !m.permissions().readonly()),
    }
}
