//! Path and identifier helpers for doctree.
//!
//! This crate provides the pure string utilities the document tree is built on:
//! - [`clean`]: collapse `.`/`..` segments and separator variants
//! - [`slug`]: derive a URL-safe ASCII identifier from a title
//! - [`relative_path`]: minimal relative path between two absolute paths
//! - [`is_absolute`] / [`to_absolute`]: classify and absolutize paths
//!
//! None of these functions touch the filesystem, except [`relative_fs_path`]
//! and [`to_absolute_from_cwd`] which consult it for directory checks and the
//! current working directory.
//!
//! # Example
//!
//! ```
//! use doctree_paths::{clean, relative_path, slug};
//!
//! assert_eq!(slug("Getting Started"), "Getting_Started");
//! assert_eq!(relative_path("/a/b/", "/a/c/d"), "../c/d");
//! assert!(!clean("a/./b/../c").contains(".."));
//! ```

mod absolute;
mod normalize;
mod relative;
mod slug;

pub use absolute::{PathError, is_absolute, to_absolute, to_absolute_from_cwd};
pub use normalize::clean;
pub use relative::{relative_fs_path, relative_path};
pub use slug::{remove_sorting_prefix, slug};
