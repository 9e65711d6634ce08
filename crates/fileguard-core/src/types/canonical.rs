//! Canonical path resolution for paths that may not exist yet.

use std::ffi::OsString;
use std::io;
use std::io::ErrorKind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Upper bound on symlinks followed while resolving one path.
const MAX_SYMLINK_HOPS: usize = 40;

/// Resolves `path` to an absolute, symlink- and traversal-free form.
///
/// `std::fs::canonicalize` fails for paths that do not exist, which is the
/// normal case for an archive entry about to be extracted. This walks up to
/// the longest existing ancestor, canonicalizes that, and then applies the
/// remaining components one at a time: `.` is dropped, `..` removes the
/// previous component, and after every step the disk is consulted again.
/// A `..` can cancel a missing component and land back on a real symlink,
/// and a dangling symlink names a target that does not exist yet; both are
/// followed.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined for a
/// relative path, if more than 40 symlinks are followed, or if a lookup
/// fails for a reason other than the path not existing.
///
/// # Examples
///
/// ```no_run
/// use fileguard_core::types::canonicalize_lenient;
/// use std::path::Path;
///
/// # fn main() -> std::io::Result<()> {
/// let resolved = canonicalize_lenient(Path::new("/tmp/out/a/../../evil"))?;
/// assert!(!resolved.starts_with("/tmp/out"));
/// # Ok(())
/// # }
/// ```
pub fn canonicalize_lenient(path: &Path) -> io::Result<PathBuf> {
    resolve(std::path::absolute(path)?, MAX_SYMLINK_HOPS)
}

fn resolve(path: PathBuf, hops: usize) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut missing: Vec<OsString> = Vec::new();

    let mut resolved = loop {
        match existing.canonicalize() {
            Ok(canonical) => break canonical,
            Err(e) if is_missing(&e) => {
                if let Some(target) = symlink_target(&existing)? {
                    break follow(target, hops)?;
                }
                let Some(last) = existing.components().next_back() else {
                    return Err(e);
                };
                missing.push(last.as_os_str().to_owned());
                if !existing.pop() {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    };

    for name in missing.iter().rev() {
        match Path::new(name).components().next() {
            Some(Component::ParentDir) => {
                resolved.pop();
            }
            Some(Component::CurDir) | None => continue,
            Some(_) => resolved.push(name),
        }
        resolved = settle(resolved, hops)?;
    }

    Ok(resolved)
}

/// Re-resolves a partially lexical path against the disk.
fn settle(path: PathBuf, hops: usize) -> io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(canonical) => Ok(canonical),
        Err(e) if is_missing(&e) => match symlink_target(&path)? {
            Some(target) => follow(target, hops),
            None => Ok(path),
        },
        Err(e) => Err(e),
    }
}

fn follow(target: PathBuf, hops: usize) -> io::Result<PathBuf> {
    let Some(hops) = hops.checked_sub(1) else {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "too many levels of symbolic links",
        ));
    };
    resolve(target, hops)
}

/// Returns the absolute target of `path` if it is a symlink.
fn symlink_target(path: &Path) -> io::Result<Option<PathBuf>> {
    match path.symlink_metadata() {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            let target = path.read_link()?;
            let base = path.parent().unwrap_or(path);
            Ok(Some(std::path::absolute(base.join(target))?))
        }
        Ok(_) => Ok(None),
        Err(e) if is_missing(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_missing(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
