//! Incremental tree construction.

use std::path::PathBuf;

use doctree_paths::{remove_sorting_prefix, slug};

use crate::entry::{Content, Directory, Entry, EntryId, EntryKind, Raw};
use crate::error::TreeError;
use crate::tree::{Tree, strip_extension};

/// Key of a content page that becomes its directory's index page.
const INDEX_URI: &str = "index.html";

/// Default recognized content extensions.
const DEFAULT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Builder for [`Tree`].
///
/// Children keep insertion order, which becomes sibling and previous/next
/// order. Child keys are derived from on-disk names:
/// - directories: `slug(remove_sorting_prefix(name))`
/// - content pages: `slug(remove_sorting_prefix(stem)) + ".html"`
/// - raw files: the name unchanged
pub struct TreeBuilder {
    entries: Vec<Entry>,
    content_extensions: Vec<String>,
}

impl TreeBuilder {
    /// Create a builder holding only the root directory.
    #[must_use]
    pub fn new(root_title: &str) -> Self {
        let root = Entry {
            name: String::new(),
            uri: String::new(),
            title: root_title.to_owned(),
            request: String::new(),
            parent: None,
            kind: EntryKind::Directory(Directory::default()),
        };
        Self {
            entries: vec![root],
            content_extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    /// Set recognized content extensions (without leading dot).
    #[must_use]
    pub fn with_content_extensions(mut self, extensions: Vec<String>) -> Self {
        self.content_extensions = extensions;
        self
    }

    /// Root directory handle.
    #[must_use]
    pub fn root(&self) -> EntryId {
        EntryId(0)
    }

    /// Add a sub-directory.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotADirectory`] if `parent` is a leaf and
    /// [`TreeError::DuplicateEntry`] if the derived key is taken.
    pub fn add_directory(
        &mut self,
        parent: EntryId,
        name: &str,
        title: &str,
    ) -> Result<EntryId, TreeError> {
        let uri = slug_or_name(name);
        self.insert(
            parent,
            name,
            uri,
            title,
            EntryKind::Directory(Directory::default()),
        )
    }

    /// Add a content page.
    ///
    /// A page whose key is `index.html` becomes the directory's index page.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::add_directory`].
    pub fn add_content(
        &mut self,
        parent: EntryId,
        name: &str,
        title: &str,
        source_path: Option<PathBuf>,
    ) -> Result<EntryId, TreeError> {
        let stem = strip_extension(name, self.content_extensions.iter().map(String::as_str));
        let uri = format!("{}.html", slug_or_name(stem));
        let is_index = uri == INDEX_URI;

        let id = self.insert(
            parent,
            name,
            uri,
            title,
            EntryKind::Content(Content { source_path }),
        )?;
        if is_index {
            self.set_index_page(parent, id)?;
        }
        Ok(id)
    }

    /// Add a raw file, keyed by its name.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::add_directory`].
    pub fn add_raw(
        &mut self,
        parent: EntryId,
        name: &str,
        source_path: Option<PathBuf>,
    ) -> Result<EntryId, TreeError> {
        self.insert(
            parent,
            name,
            name.to_owned(),
            name,
            EntryKind::Raw(Raw { source_path }),
        )
    }

    /// Designate `entry` as the index page of `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotADirectory`] if `directory` is a leaf and
    /// [`TreeError::IndexNotAChild`] if `entry` is not one of its children.
    pub fn set_index_page(&mut self, directory: EntryId, entry: EntryId) -> Result<(), TreeError> {
        let entry_request = self.entries[entry.0].request.clone();
        let dir_entry = &mut self.entries[directory.0];
        let request = dir_entry.request.clone();

        let EntryKind::Directory(dir) = &mut dir_entry.kind else {
            return Err(TreeError::NotADirectory(request));
        };
        if !dir.contains(entry) {
            return Err(TreeError::IndexNotAChild {
                directory: request,
                entry: entry_request,
            });
        }
        dir.set_index_page(entry);
        Ok(())
    }

    /// Finish construction.
    #[must_use]
    pub fn build(self) -> Tree {
        Tree::new(self.entries, self.content_extensions)
    }

    fn insert(
        &mut self,
        parent: EntryId,
        name: &str,
        uri: String,
        title: &str,
        kind: EntryKind,
    ) -> Result<EntryId, TreeError> {
        let id = EntryId(self.entries.len());
        let parent_entry = &mut self.entries[parent.0];
        let request = if parent_entry.request.is_empty() {
            uri.clone()
        } else {
            format!("{}/{uri}", parent_entry.request)
        };

        let EntryKind::Directory(dir) = &mut parent_entry.kind else {
            return Err(TreeError::NotADirectory(parent_entry.request.clone()));
        };
        if !dir.insert(&uri, id) {
            return Err(TreeError::DuplicateEntry {
                parent: parent_entry.request.clone(),
                name: uri,
            });
        }

        self.entries.push(Entry {
            name: name.to_owned(),
            uri,
            title: title.to_owned(),
            request,
            parent: Some(parent),
            kind,
        });
        Ok(id)
    }
}

/// Slug of the name without its sorting prefix, or the name itself if that slug is empty.
fn slug_or_name(name: &str) -> String {
    let slugged = slug(remove_sorting_prefix(name));
    if slugged.is_empty() {
        name.to_owned()
    } else {
        slugged
    }
}
