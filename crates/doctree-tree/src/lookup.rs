//! Tolerant request lookup.
//!
//! Authors link to pages by literal file name, by human title, URL-encoded or
//! not, with or without an output extension. [`Tree::find`] accepts all of
//! these forms and walks the tree one segment at a time.

use std::borrow::Cow;

use doctree_paths::{remove_sorting_prefix, slug};
use percent_encoding::percent_decode_str;

use crate::entry::EntryId;
use crate::tree::Tree;

impl Tree {
    /// Find the entry addressed by a slash-separated `request`, starting at `subtree`.
    ///
    /// Each segment is matched against the current directory's children by
    /// exact key, then by the slug of its URL-decoded form, then by the
    /// candidate output file names derived from it. `.` is skipped, `..` moves
    /// to the parent (staying put at the root). An empty segment (from `""`,
    /// `"docs/"` or `"a//b"`) matches nothing, so such requests fail. An
    /// unmatched `index` or `index.html` segment yields the directory's index
    /// page.
    ///
    /// A request ending on a directory resolves to its index page. Returns
    /// `None` when nothing matches, when a segment descends into a leaf, or
    /// when the final directory has no index page.
    #[must_use]
    pub fn find(&self, subtree: EntryId, request: &str) -> Option<EntryId> {
        let mut node = subtree;

        for segment in request.split('/') {
            let dir = self.directory(node)?;

            match segment {
                "." => continue,
                ".." => {
                    node = self.parent(node).unwrap_or(node);
                    continue;
                }
                _ => {}
            }

            if let Some(child) = dir.child(segment) {
                node = child;
                continue;
            }

            let slugged = slug(&url_decode(segment));
            if let Some(child) = dir.child(&slugged) {
                node = child;
                continue;
            }

            if let Some(child) = self
                .candidate_filenames(&slugged)
                .iter()
                .find_map(|name| dir.child(name))
            {
                node = child;
                continue;
            }

            return if slugged == "index" || slugged == "index.html" {
                dir.index_page()
            } else {
                None
            };
        }

        match self.directory(node) {
            Some(dir) => dir.index_page(),
            None => Some(node),
        }
    }

    /// Output file names a segment may refer to: `<name>.html` and `<name>`,
    /// where `<name>` has its content extension and sorting prefix removed.
    pub(crate) fn candidate_filenames(&self, segment: &str) -> [String; 2] {
        let name = remove_sorting_prefix(self.strip_output_extension(segment));
        [format!("{name}.html"), name.to_owned()]
    }
}

/// Decode a URL-encoded segment (`+` as space, `%XX` escapes, invalid UTF-8 replaced).
fn url_decode(segment: &str) -> Cow<'_, str> {
    if !segment.contains(['+', '%']) {
        return Cow::Borrowed(segment);
    }
    let spaced = segment.replace('+', " ");
    Cow::Owned(percent_decode_str(&spaced).decode_utf8_lossy().into_owned())
}
