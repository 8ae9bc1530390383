//! Immutable document tree.
//!
//! # Architecture
//!
//! Entries are stored in a flat `Vec<Entry>` with parent links and child lists
//! expressed as [`EntryId`] handles. This provides:
//! - O(1) access by handle and O(1) lookup by canonical request
//! - Parent navigation without reference cycles
//! - Cheap sharing across threads (`Tree` is `Send + Sync` and never mutated)

use std::collections::HashMap;

use crate::entry::{Directory, Entry, EntryId, EntryKind};

/// Document tree rooted at a single directory.
///
/// Built once by [`TreeBuilder`](crate::TreeBuilder) or
/// [`Scanner`](crate::Scanner); every operation afterwards is a read-only
/// traversal.
#[derive(Debug)]
pub struct Tree {
    entries: Vec<Entry>,
    request_index: HashMap<String, EntryId>,
    content_extensions: Vec<String>,
}

impl Tree {
    pub(crate) fn new(entries: Vec<Entry>, content_extensions: Vec<String>) -> Self {
        let request_index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.request.clone(), EntryId(i)))
            .collect();

        Self {
            entries,
            request_index,
            content_extensions,
        }
    }

    /// Root directory.
    #[must_use]
    pub fn root(&self) -> EntryId {
        EntryId(0)
    }

    /// Get an entry by handle.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued for this tree.
    #[must_use]
    pub fn entry(&self, id: EntryId) -> &Entry {
        &self.entries[id.0]
    }

    /// Get an entry by its canonical request (e.g., `"api/intro.html"`, `""` for the root).
    #[must_use]
    pub fn get(&self, request: &str) -> Option<EntryId> {
        self.request_index.get(request).copied()
    }

    /// Parent directory of an entry.
    #[must_use]
    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.entry(id).parent
    }

    /// Directory data of an entry, `None` for leaves.
    #[must_use]
    pub fn directory(&self, id: EntryId) -> Option<&Directory> {
        self.entry(id).as_directory()
    }

    /// Children in insertion order, empty for leaves.
    #[must_use]
    pub fn children(&self, id: EntryId) -> &[EntryId] {
        self.directory(id).map_or(&[], Directory::children)
    }

    /// Index page of a directory.
    #[must_use]
    pub fn index_page(&self, id: EntryId) -> Option<EntryId> {
        self.directory(id).and_then(Directory::index_page)
    }

    /// All handles in arena order (the root first).
    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        (0..self.entries.len()).map(EntryId)
    }

    /// Number of entries, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the tree holds nothing but its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Recognized content file extensions, without the leading dot.
    #[must_use]
    pub fn content_extensions(&self) -> &[String] {
        &self.content_extensions
    }

    /// Link target for an entry: the base URL followed by its request.
    ///
    /// A directory links to its index page when it has one.
    #[must_use]
    pub fn href(&self, id: EntryId, base_url: &str) -> String {
        let target = match &self.entry(id).kind {
            EntryKind::Directory(dir) => dir.index_page().unwrap_or(id),
            EntryKind::Content(_) | EntryKind::Raw(_) => id,
        };
        format!("{base_url}{}", self.entry(target).request)
    }

    /// Strip a content or `.html` extension from a name, if present.
    pub(crate) fn strip_output_extension<'a>(&self, name: &'a str) -> &'a str {
        let extensions = self.content_extensions.iter().map(String::as_str);
        strip_extension(name, extensions.chain(std::iter::once("html")))
    }
}

/// Strip a `.<ext>` suffix. When several extensions match, the longest stem wins.
pub(crate) fn strip_extension<'a, 'e>(
    name: &'a str,
    extensions: impl IntoIterator<Item = &'e str>,
) -> &'a str {
    extensions
        .into_iter()
        .filter_map(|ext| name.strip_suffix(ext)?.strip_suffix('.'))
        .max_by_key(|stem| stem.len())
        .unwrap_or(name)
}
