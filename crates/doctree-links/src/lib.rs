//! Markdown link processing for doctree.
//!
//! This crate adapts `pulldown-cmark` event streams:
//! - [`LinkProcessor`]: rewrites internal link and image targets to
//!   `base_url + request`, keeping `#fragment`s and reporting links that do
//!   not resolve
//! - [`SymbolLinker`]: turns API symbol names in text and inline code into
//!   links to their reference pages
//! - [`render_html`]: both adapters plus HTML output in one call
//!
//! # Example
//!
//! ```
//! use doctree_links::render_html;
//! use doctree_tree::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new("Docs");
//! let root = builder.root();
//! let guide = builder.add_content(root, "guide.md", "Guide", None)?;
//! let api = builder.add_directory(root, "api", "API")?;
//! let intro = builder.add_content(api, "intro.md", "Intro", None)?;
//! let tree = builder.build();
//!
//! let result = render_html(&tree, intro, "See [the guide](!guide#setup).", "../", None);
//! assert!(result.html.contains(r#"href="../guide.html#setup""#));
//! assert!(result.warnings.is_empty());
//! # let _ = guide;
//! # Ok::<(), doctree_tree::TreeError>(())
//! ```

mod escape;
mod processor;
mod render;
mod symbols;

pub use processor::{LinkProcessor, LinkTarget};
pub use render::{RenderResult, render_html};
pub use symbols::SymbolLinker;
