//! Tree construction by filesystem walking.
//!
//! Each directory is read once, its entries are classified as directories,
//! content pages or raw files, ordered, and handed to a [`TreeBuilder`].
//! Content pages are read only to extract their title.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use doctree_config::{Config, DocsConfig, IgnoreConfig};
use doctree_paths::remove_sorting_prefix;
use regex::Regex;

use crate::builder::TreeBuilder;
use crate::entry::EntryId;
use crate::error::TreeError;
use crate::tree::{Tree, strip_extension};

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Title used when the source directory has no usable name.
const DEFAULT_ROOT_TITLE: &str = "Docs";

/// Scan `source_dir` with the extensions and ignore lists of `config`.
///
/// # Errors
///
/// Returns [`TreeError::Io`] if `source_dir` cannot be read.
pub fn scan_directory(source_dir: &Path, config: &Config) -> Result<Tree, TreeError> {
    let mut scanner = Scanner::from_config(config);
    source_dir.clone_into(&mut scanner.docs.source_dir);
    scanner.scan()
}

/// Builds a [`Tree`] from a content directory.
///
/// Hidden entries (leading `.`) and configured ignored files and folders are
/// skipped. Siblings are ordered with the index page first, then by name,
/// with names starting with `-` last.
#[derive(Debug, Clone)]
pub struct Scanner {
    docs: DocsConfig,
    ignore: IgnoreConfig,
}

impl Scanner {
    /// Create a scanner with default extensions and ignore lists.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            docs: DocsConfig {
                source_dir,
                ..DocsConfig::default()
            },
            ignore: IgnoreConfig::default(),
        }
    }

    /// Create a scanner for the configured source directory.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            docs: config.docs_resolved.clone(),
            ignore: config.ignore.clone(),
        }
    }

    /// Directory being scanned.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.docs.source_dir
    }

    /// Walk the source directory and build the tree.
    ///
    /// Unreadable sub-directories and entries whose key collides with a
    /// sibling are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Io`] if the source directory itself cannot be read.
    pub fn scan(&self) -> Result<Tree, TreeError> {
        let source_dir = &self.docs.source_dir;
        let entries = fs::read_dir(source_dir).map_err(|source| TreeError::Io {
            path: source_dir.clone(),
            source,
        })?;

        let root_title = source_dir
            .file_name()
            .map(|name| title_from_name(&name.to_string_lossy()))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_ROOT_TITLE.to_owned());

        let mut builder = TreeBuilder::new(&root_title)
            .with_content_extensions(self.docs.content_extensions.clone());
        let root = builder.root();
        self.scan_entries(&mut builder, root, entries)?;

        let tree = builder.build();
        tracing::debug!(
            path = %source_dir.display(),
            entries = tree.len(),
            "Scanned content directory"
        );
        Ok(tree)
    }

    fn scan_dir(
        &self,
        builder: &mut TreeBuilder,
        dir: EntryId,
        path: &Path,
    ) -> Result<(), TreeError> {
        match fs::read_dir(path) {
            Ok(entries) => self.scan_entries(builder, dir, entries),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read directory");
                Ok(())
            }
        }
    }

    fn scan_entries(
        &self,
        builder: &mut TreeBuilder,
        parent: EntryId,
        entries: fs::ReadDir,
    ) -> Result<(), TreeError> {
        let mut found: Vec<FoundEntry> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| self.classify(&entry))
            .collect();
        found.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        for item in found {
            self.add(builder, parent, &item)?;
        }
        Ok(())
    }

    fn classify(&self, entry: &fs::DirEntry) -> Option<FoundEntry> {
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();

        if name.starts_with('.') {
            tracing::debug!(path = %path.display(), "Skipping hidden entry");
            return None;
        }

        let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
        let ignored = if is_dir {
            self.ignore.folders.contains(&name)
        } else {
            self.ignore.files.contains(&name)
        };
        if ignored {
            tracing::debug!(path = %path.display(), "Skipping ignored entry");
            return None;
        }

        let kind = if is_dir {
            FoundKind::Directory
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.docs.is_content_extension(ext))
        {
            FoundKind::Content
        } else {
            FoundKind::Raw
        };

        let is_index =
            kind == FoundKind::Content && remove_sorting_prefix(self.stem(&name)) == "index";
        Some(FoundEntry {
            name,
            path,
            kind,
            is_index,
        })
    }

    fn add(
        &self,
        builder: &mut TreeBuilder,
        parent: EntryId,
        item: &FoundEntry,
    ) -> Result<(), TreeError> {
        let added = match item.kind {
            FoundKind::Directory => {
                builder.add_directory(parent, &item.name, &title_from_name(&item.name))
            }
            FoundKind::Content => {
                let title = read_title(&item.path)
                    .unwrap_or_else(|| title_from_name(self.stem(&item.name)));
                builder.add_content(parent, &item.name, &title, Some(item.path.clone()))
            }
            FoundKind::Raw => builder.add_raw(parent, &item.name, Some(item.path.clone())),
        };

        match added {
            Ok(id) if item.kind == FoundKind::Directory => self.scan_dir(builder, id, &item.path),
            Ok(_) => Ok(()),
            Err(TreeError::DuplicateEntry { parent: dir, name }) => {
                tracing::warn!(
                    path = %item.path.display(),
                    parent = %dir,
                    name = %name,
                    "Skipping entry with duplicate name"
                );
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn stem<'a>(&self, name: &'a str) -> &'a str {
        strip_extension(name, self.docs.content_extensions.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FoundKind {
    Directory,
    Content,
    Raw,
}

#[derive(Debug)]
struct FoundEntry {
    name: String,
    path: PathBuf,
    kind: FoundKind,
    is_index: bool,
}

impl FoundEntry {
    /// Index page first, then regular names, then `-`-prefixed names.
    fn sort_key(&self) -> (u8, &str) {
        let rank = if self.is_index {
            0
        } else if self.name.starts_with('-') {
            2
        } else {
            1
        };
        (rank, &self.name)
    }
}

/// First `# ` heading of a content file.
fn read_title(path: &Path) -> Option<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Failed to read content for title");
            return None;
        }
    };
    let caps = H1_RE.captures(&content)?;
    Some(caps[1].trim().to_owned())
}

/// Title from an on-disk name: sorting prefix removed, `_` and `-` as spaces.
fn title_from_name(name: &str) -> String {
    remove_sorting_prefix(name).replace(['_', '-'], " ").trim().to_owned()
}
