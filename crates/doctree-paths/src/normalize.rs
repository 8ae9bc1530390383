//! Lexical path normalization.

use std::path::MAIN_SEPARATOR_STR;

/// Remove all `.` and `..` segments from a path without touching the filesystem.
///
/// Both `/` and `\` are treated as separators and empty segments are dropped.
/// A `..` pops the most recently kept segment; popping past the start is a
/// no-op, so leading `..` segments simply disappear. The result is joined with
/// the platform separator and never has a leading or trailing separator.
///
/// # Examples
///
/// ```
/// use std::path::MAIN_SEPARATOR_STR;
/// use doctree_paths::clean;
///
/// assert_eq!(clean("a/./b/../c"), ["a", "c"].join(MAIN_SEPARATOR_STR));
/// assert_eq!(clean("../a"), "a");
/// ```
#[must_use]
pub fn clean(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();

    for part in path.split(['/', '\\']).filter(|s| !s.is_empty()) {
        match part {
            "." => {}
            ".." => {
                kept.pop();
            }
            _ => kept.push(part),
        }
    }

    kept.join(MAIN_SEPARATOR_STR)
}
