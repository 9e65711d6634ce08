//! Flattening of externally supplied path fragments into single file names.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static DOT_BEFORE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.[/\\]").unwrap());

#[allow(clippy::unwrap_used)]
static SEPARATOR_BEFORE_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[/\\]\.{2,}").unwrap());

/// Removes the relative part of a file name.
///
/// The result has no `..` traversal sequences and no `/` separators, so it
/// can be used as a single path component:
///
/// 1. blank input is returned unchanged;
/// 2. a `.` followed by `/` or `\` loses the separator;
/// 3. a separator followed by two or more dots becomes `_`;
/// 4. every remaining `/` is dropped.
///
/// Distinct inputs can flatten to the same name; callers that need unique
/// names must add their own disambiguator.
///
/// # Examples
///
/// ```
/// use fileguard_core::sanitize::remove_relative_path;
///
/// assert_eq!(remove_relative_path("/mydatabase/../../database1"), "mydatabase_database1");
/// assert_eq!(remove_relative_path(""), "");
/// ```
#[must_use]
pub fn remove_relative_path(raw: &str) -> String {
    if raw.trim().is_empty() {
        return raw.to_string();
    }

    let result = DOT_BEFORE_SEPARATOR.replace_all(raw, ".");
    let result = SEPARATOR_BEFORE_DOTS.replace_all(&result, "_");
    result.replace('/', "")
}
