//! Absolute path classification.

use std::sync::LazyLock;

use regex::Regex;

/// Optional `scheme://` wrappers, an optional root marker, then the path.
static ABSOLUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<wrappers>(?:[[:print:]]{2,}://)*)(?P<root>(?:[[:alpha:]]:/|/)?)(?P<path>[[:print:]]*)$")
        .unwrap()
});

/// Error returned for malformed path strings.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// Path is empty or contains non-printable characters.
    #[error("Path can not have non-printable characters or be empty: {0:?}")]
    InvalidInput(String),
    /// Path does not follow the `[wrapper://]*[root]path` form.
    #[error("Path is not valid: {0}")]
    InvalidPath(String),
}

/// Check whether a path is absolute.
///
/// A path may start with any number of stream wrappers (`phar://`,
/// `file://`, ...) followed by an optional root marker, either `/` or a
/// drive letter form such as `C:/`. The path is absolute iff the root marker
/// is present.
///
/// # Errors
///
/// Returns [`PathError::InvalidInput`] for an empty path or one containing
/// characters outside printable ASCII.
///
/// # Examples
///
/// ```
/// use doctree_paths::is_absolute;
///
/// assert!(is_absolute("/x/y").unwrap());
/// assert!(is_absolute("C:/docs").unwrap());
/// assert!(!is_absolute("x/y").unwrap());
/// assert!(is_absolute("").is_err());
/// ```
pub fn is_absolute(path: &str) -> Result<bool, PathError> {
    if path.is_empty() || !path.chars().all(|c| matches!(c, ' '..='~')) {
        return Err(PathError::InvalidInput(path.to_owned()));
    }

    let caps = ABSOLUTE_RE
        .captures(path)
        .ok_or_else(|| PathError::InvalidPath(path.to_owned()))?;

    Ok(caps.name("root").is_some_and(|m| !m.is_empty()))
}

/// Return `path` unchanged if absolute, otherwise prefix it with `cwd`.
///
/// # Errors
///
/// Propagates [`is_absolute`] errors for malformed paths.
pub fn to_absolute(path: &str, cwd: &str) -> Result<String, PathError> {
    if is_absolute(path)? {
        return Ok(path.to_owned());
    }
    Ok(format!("{}/{path}", cwd.trim_end_matches('/')))
}

/// Like [`to_absolute`], using the process's current working directory.
///
/// # Errors
///
/// Propagates [`is_absolute`] errors, and returns [`PathError::InvalidPath`]
/// when the current directory cannot be determined.
pub fn to_absolute_from_cwd(path: &str) -> Result<String, PathError> {
    let cwd = std::env::current_dir().map_err(|_| PathError::InvalidPath(path.to_owned()))?;
    to_absolute(path, &cwd.to_string_lossy())
}
