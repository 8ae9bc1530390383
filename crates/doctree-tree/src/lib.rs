//! Document tree model, lookup and link resolution for doctree.
//!
//! This crate provides:
//! - [`Tree`]: an immutable arena of [`Entry`] nodes built by [`TreeBuilder`]
//!   or scanned from disk by [`Scanner`]
//! - [`Tree::find`]: tolerant lookup of a slash-separated request
//! - [`ResolutionContext`]: ordered link resolution (legacy absolute, current
//!   directory, root) with a typed [`LinkNotFound`] failure
//! - Navigation helpers: previous/next pages and breadcrumbs
//!
//! # Quick Start
//!
//! ```
//! use doctree_tree::{ResolutionContext, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new("Docs");
//! let root = builder.root();
//! let guide = builder.add_content(root, "01_guide.md", "Guide", None)?;
//! let api = builder.add_directory(root, "api", "API")?;
//! let intro = builder.add_content(api, "intro.md", "Intro", None)?;
//! let tree = builder.build();
//!
//! assert_eq!(tree.find(root, "guide"), Some(guide));
//! assert_eq!(tree.entry(intro).request, "api/intro.html");
//!
//! let context = ResolutionContext::new(&tree, intro);
//! assert_eq!(context.resolve("!guide"), Ok(guide));
//! # Ok::<(), doctree_tree::TreeError>(())
//! ```

mod builder;
mod entry;
mod error;
mod lookup;
mod navigation;
mod resolver;
mod scanner;
mod tree;

pub use builder::TreeBuilder;
pub use entry::{Content, Directory, Entry, EntryId, EntryKind, Raw};
pub use error::TreeError;
pub use navigation::BreadcrumbItem;
pub use resolver::{
    LinkKind, LinkNotFound, ResolutionContext, is_external_url, is_valid_url, link_kind,
    resolve_internal_file,
};
pub use scanner::{Scanner, scan_directory};
pub use tree::Tree;
