//! Tree node types.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Handle to an [`Entry`] inside a [`Tree`](crate::Tree).
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    /// Position of the entry in the tree's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of the document tree.
#[derive(Clone, Debug)]
pub struct Entry {
    /// Raw on-disk name (e.g., `"01_Getting_Started.md"`).
    pub name: String,
    /// Key under which the parent directory stores this entry (e.g., `"Getting_Started.html"`).
    pub uri: String,
    /// Display title.
    pub title: String,
    /// Canonical slash-separated request without leading slash (`""` for the root).
    pub request: String,
    pub(crate) parent: Option<EntryId>,
    /// Variant-specific data.
    pub kind: EntryKind,
}

impl Entry {
    /// Parent directory, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    /// Directory data if this entry is a directory.
    #[must_use]
    pub fn as_directory(&self) -> Option<&Directory> {
        match &self.kind {
            EntryKind::Directory(dir) => Some(dir),
            EntryKind::Content(_) | EntryKind::Raw(_) => None,
        }
    }

    #[must_use]
    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(_))
    }

    #[must_use]
    pub fn is_content(&self) -> bool {
        matches!(self.kind, EntryKind::Content(_))
    }

    /// Source file on disk, if the entry was scanned from one.
    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        match &self.kind {
            EntryKind::Directory(_) => None,
            EntryKind::Content(content) => content.source_path.as_deref(),
            EntryKind::Raw(raw) => raw.source_path.as_deref(),
        }
    }
}

/// Entry variants.
#[derive(Clone, Debug)]
pub enum EntryKind {
    /// Directory with ordered children.
    Directory(Directory),
    /// Content page (markdown or another configured extension).
    Content(Content),
    /// Any other file, served as-is.
    Raw(Raw),
}

/// Directory data: ordered children and an optional index page.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    children: Vec<EntryId>,
    by_uri: HashMap<String, EntryId>,
    index_page: Option<EntryId>,
}

impl Directory {
    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[EntryId] {
        &self.children
    }

    /// Child stored under `uri`.
    #[must_use]
    pub fn child(&self, uri: &str) -> Option<EntryId> {
        self.by_uri.get(uri).copied()
    }

    /// Entry returned when the directory itself is requested.
    #[must_use]
    pub fn index_page(&self) -> Option<EntryId> {
        self.index_page
    }

    pub(crate) fn contains(&self, id: EntryId) -> bool {
        self.children.contains(&id)
    }

    /// Insert a child, returning `false` if `uri` is taken.
    pub(crate) fn insert(&mut self, uri: &str, id: EntryId) -> bool {
        if self.by_uri.contains_key(uri) {
            return false;
        }
        self.by_uri.insert(uri.to_owned(), id);
        self.children.push(id);
        true
    }

    pub(crate) fn set_index_page(&mut self, id: EntryId) {
        self.index_page = Some(id);
    }
}

/// Content page data.
#[derive(Clone, Debug, Default)]
pub struct Content {
    /// Source file, `None` for pages built in memory.
    pub source_path: Option<PathBuf>,
}

/// Raw file data.
#[derive(Clone, Debug, Default)]
pub struct Raw {
    /// Source file, `None` for files built in memory.
    pub source_path: Option<PathBuf>,
}
