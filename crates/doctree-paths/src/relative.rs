//! Relative path computation between two absolute paths.

use std::collections::VecDeque;
use std::path::Path;

/// Compute the path of `to` relative to `from`.
///
/// Both paths are split on `/` (backslashes are converted first). A trailing
/// `/` marks a directory, so `from = "/a/b/"` means "inside `b`" while
/// `from = "/a/b"` means "the file `b` inside `a`". Segments shared from the
/// root are dropped; at the first divergence one `..` is prepended for every
/// `from` segment left beyond the last one.
///
/// Unrelated paths never fail: they produce a `..`-laden path back to the
/// common ancestor (the root in the degenerate case).
///
/// # Examples
///
/// ```
/// use doctree_paths::relative_path;
///
/// assert_eq!(relative_path("/a/b/", "/a/c/d"), "../c/d");
/// assert_eq!(relative_path("/a/b/", "/a/b/c"), "c");
/// ```
#[must_use]
pub fn relative_path(from: &str, to: &str) -> String {
    let from = from.replace('\\', "/");
    let to = to.replace('\\', "/");

    let from: Vec<&str> = from.split('/').collect();
    let to: Vec<&str> = to.split('/').collect();
    let mut rel: VecDeque<&str> = to.iter().copied().collect();

    for (depth, dir) in from.iter().enumerate() {
        if to.get(depth) == Some(dir) {
            rel.pop_front();
            continue;
        }

        let remaining = from.len() - depth;
        if remaining > 1 {
            for _ in 0..remaining - 1 {
                rel.push_front("..");
            }
            break;
        }
    }

    rel.into_iter().collect::<Vec<_>>().join("/")
}

/// Like [`relative_path`], but marks existing directories with a trailing `/`.
///
/// Intended for output paths on disk, where a path without a trailing slash
/// may still denote a directory.
#[must_use]
pub fn relative_fs_path(from: &Path, to: &Path) -> String {
    relative_path(&directory_aware(from), &directory_aware(to))
}

fn directory_aware(path: &Path) -> String {
    let display = path.to_string_lossy();
    if path.is_dir() {
        format!("{}/", display.trim_end_matches(['/', '\\']))
    } else {
        display.into_owned()
    }
}
