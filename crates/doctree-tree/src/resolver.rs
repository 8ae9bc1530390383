//! Link resolution against the document tree.
//!
//! A link is resolved by trying a fixed list of strategies and keeping the
//! first hit:
//!
//! 1. Legacy absolute: links starting with `!` or `/` are looked up from the
//!    root with the markers stripped.
//! 2. Current directory: the link as written, from the current page's parent.
//! 3. Root: the link as written, from the root. Skipped when step 1 applied.
//!
//! External and invalid links never reach the tree; see [`link_kind`].

use std::sync::LazyLock;

use regex::Regex;

use crate::entry::EntryId;
use crate::tree::Tree;

/// Scheme-prefixed (`https://`), protocol-relative (`//`) or `mailto:` links.
static EXTERNAL_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[a-z]+:)?//|^mailto:").unwrap());

/// Link resolution failure, carrying the link as written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Could not locate file '{link}'")]
pub struct LinkNotFound {
    /// Unresolved link text.
    pub link: String,
}

/// How a link should be treated before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Empty or a bare `#fragment`; passed through untouched.
    Invalid,
    /// Points outside the tree; passed through untouched.
    External,
    /// Must be resolved against the tree.
    Internal,
}

/// Classify a link target.
#[must_use]
pub fn link_kind(url: &str) -> LinkKind {
    if !is_valid_url(url) {
        LinkKind::Invalid
    } else if is_external_url(url) {
        LinkKind::External
    } else {
        LinkKind::Internal
    }
}

/// True for a non-empty link that is not a bare fragment.
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    !url.is_empty() && !url.starts_with('#')
}

/// True for scheme-prefixed, protocol-relative or `mailto:` links.
///
/// # Examples
///
/// ```
/// use doctree_tree::is_external_url;
///
/// assert!(is_external_url("https://example.com"));
/// assert!(is_external_url("mailto:a@b.com"));
/// assert!(!is_external_url("guide.md"));
/// ```
#[must_use]
pub fn is_external_url(url: &str) -> bool {
    EXTERNAL_URL_RE.is_match(url)
}

/// Resolve `link` from `current_page` (or from nowhere in particular).
///
/// Shorthand for [`ResolutionContext::resolve`].
///
/// # Errors
///
/// Returns [`LinkNotFound`] when every applicable strategy misses.
pub fn resolve_internal_file(
    tree: &Tree,
    current_page: Option<EntryId>,
    link: &str,
) -> Result<EntryId, LinkNotFound> {
    ResolutionContext {
        tree,
        current_page,
    }
    .resolve(link)
}

/// Per-page resolution state.
///
/// Cheap to create; build one per page being rendered.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    tree: &'a Tree,
    current_page: Option<EntryId>,
}

impl<'a> ResolutionContext<'a> {
    /// Context for links written on `current_page`.
    #[must_use]
    pub fn new(tree: &'a Tree, current_page: EntryId) -> Self {
        Self {
            tree,
            current_page: Some(current_page),
        }
    }

    /// Context without a current page; only root lookups apply.
    #[must_use]
    pub fn at_root(tree: &'a Tree) -> Self {
        Self {
            tree,
            current_page: None,
        }
    }

    /// Page whose links are being resolved.
    #[must_use]
    pub fn current_page(&self) -> Option<EntryId> {
        self.current_page
    }

    /// Resolve a link to a tree entry.
    ///
    /// # Errors
    ///
    /// Returns [`LinkNotFound`] with the original link when no strategy finds it.
    pub fn resolve(&self, link: &str) -> Result<EntryId, LinkNotFound> {
        if link.is_empty() {
            return Err(LinkNotFound {
                link: String::new(),
            });
        }

        let found = Strategy::for_link(link)
            .into_iter()
            .flatten()
            .find_map(|strategy| {
                let hit = strategy.attempt(self, link);
                tracing::trace!(link, ?strategy, found = hit.is_some(), "Link resolution attempt");
                hit
            });

        found.ok_or_else(|| {
            tracing::debug!(link, "Link not found");
            LinkNotFound {
                link: link.to_owned(),
            }
        })
    }

    /// Directory that anchors relative links: the current page's parent.
    fn current_directory(&self) -> Option<EntryId> {
        self.current_page.and_then(|page| self.tree.parent(page))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    LegacyAbsolute,
    CurrentRelative,
    RootRelative,
}

impl Strategy {
    /// Strategies applicable to `link`, in the order they are tried.
    fn for_link(link: &str) -> [Option<Self>; 3] {
        let legacy = link.starts_with(['!', '/']);
        [
            legacy.then_some(Self::LegacyAbsolute),
            Some(Self::CurrentRelative),
            (!legacy).then_some(Self::RootRelative),
        ]
    }

    fn attempt(self, context: &ResolutionContext<'_>, link: &str) -> Option<EntryId> {
        let tree = context.tree;
        match self {
            Self::LegacyAbsolute => {
                let stripped = link.trim_start_matches(['!', '/']);
                tree.find(tree.root(), stripped)
            }
            Self::CurrentRelative => tree.find(context.current_directory()?, link),
            Self::RootRelative => tree.find(tree.root(), link),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::TreeBuilder;

    struct Fixture {
        tree: Tree,
        guide: EntryId,
        api_index: EntryId,
        intro: EntryId,
        api_guide: EntryId,
        deep: EntryId,
    }

    /// `{guide.md, api/{index.md, intro.md, guide.md, v2/{deep.md}}}`
    fn fixture() -> Fixture {
        let mut builder = TreeBuilder::new("Docs");
        let root = builder.root();
        let guide = builder.add_content(root, "guide.md", "Guide", None).unwrap();
        let api = builder.add_directory(root, "api", "API").unwrap();
        let api_index = builder.add_content(api, "index.md", "API", None).unwrap();
        let intro = builder.add_content(api, "intro.md", "Intro", None).unwrap();
        let api_guide = builder.add_content(api, "guide.md", "API Guide", None).unwrap();
        let v2 = builder.add_directory(api, "v2", "V2").unwrap();
        let deep = builder.add_content(v2, "deep.md", "Deep", None).unwrap();

        Fixture {
            tree: builder.build(),
            guide,
            api_index,
            intro,
            api_guide,
            deep,
        }
    }

    #[test]
    fn test_current_directory_wins_over_root() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.intro);
        assert_eq!(context.resolve("guide"), Ok(f.api_guide));
        assert_eq!(context.resolve("guide.md"), Ok(f.api_guide));
    }

    #[test]
    fn test_falls_back_to_root() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.deep);
        assert_eq!(context.resolve("guide"), Ok(f.guide));
        assert_eq!(context.resolve("api/intro"), Ok(f.intro));
    }

    #[test]
    fn test_legacy_absolute_ignores_current_page() {
        let f = fixture();
        for page in [f.guide, f.intro, f.api_guide, f.deep] {
            let context = ResolutionContext::new(&f.tree, page);
            assert_eq!(context.resolve("!guide"), Ok(f.guide));
            assert_eq!(context.resolve("/guide.md"), Ok(f.guide));
        }
    }

    #[test]
    fn test_legacy_absolute_strips_repeated_markers() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.deep);
        assert_eq!(context.resolve("!/api/intro"), Ok(f.intro));
        assert_eq!(context.resolve("//api/intro"), Ok(f.intro));
    }

    #[test]
    fn test_legacy_absolute_miss_skips_root_pass() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.intro);
        // Found neither at the root nor under api/ as written
        assert_eq!(
            context.resolve("!intro"),
            Err(LinkNotFound {
                link: "!intro".to_owned()
            })
        );
    }

    #[test]
    fn test_legacy_markers_never_match_current_directory() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.intro);
        for link in ["!intro", "/intro", "!/intro"] {
            assert_eq!(
                context.resolve(link),
                Err(LinkNotFound {
                    link: link.to_owned()
                })
            );
        }
        assert_eq!(context.resolve("/api/intro"), Ok(f.intro));
    }

    #[test]
    fn test_relative_parent_segments() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.deep);
        assert_eq!(context.resolve("../intro"), Ok(f.intro));
        assert_eq!(context.resolve("../../guide"), Ok(f.guide));
        assert_eq!(context.resolve("./deep.html"), Ok(f.deep));
    }

    #[test]
    fn test_directory_link_resolves_index() {
        let f = fixture();
        let context = ResolutionContext::new(&f.tree, f.guide);
        assert_eq!(context.resolve("api"), Ok(f.api_index));
        assert_eq!(
            context.resolve("api/"),
            Err(LinkNotFound {
                link: "api/".to_owned()
            })
        );
        assert_eq!(
            context.resolve("api/v2"),
            Err(LinkNotFound {
                link: "api/v2".to_owned()
            })
        );
    }

    #[test]
    fn test_at_root_context() {
        let f = fixture();
        let context = ResolutionContext::at_root(&f.tree);
        assert_eq!(context.current_page(), None);
        assert_eq!(context.resolve("guide"), Ok(f.guide));
        assert_eq!(context.resolve("api/v2/deep"), Ok(f.deep));
    }

    #[test]
    fn test_resolve_internal_file() {
        let f = fixture();
        assert_eq!(resolve_internal_file(&f.tree, Some(f.intro), "guide"), Ok(f.api_guide));
        assert_eq!(resolve_internal_file(&f.tree, None, "guide"), Ok(f.guide));
    }

    #[test]
    fn test_empty_link_not_found() {
        let f = fixture();
        let err = resolve_internal_file(&f.tree, Some(f.intro), "").unwrap_err();
        assert_eq!(err.link, "");
    }

    #[test]
    fn test_link_not_found_message() {
        let err = LinkNotFound {
            link: "missing.md".to_owned(),
        };
        assert_eq!(err.to_string(), "Could not locate file 'missing.md'");
    }

    #[test]
    fn test_strategy_order() {
        assert_eq!(
            Strategy::for_link("!guide"),
            [Some(Strategy::LegacyAbsolute), Some(Strategy::CurrentRelative), None]
        );
        assert_eq!(
            Strategy::for_link("guide"),
            [None, Some(Strategy::CurrentRelative), Some(Strategy::RootRelative)]
        );
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("guide.md"));
        assert!(is_valid_url("guide.md#setup"));
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("#setup"));
    }

    #[test]
    fn test_is_external_url() {
        assert!(is_external_url("https://example.com"));
        assert!(is_external_url("ftp://files.example.com/a"));
        assert!(is_external_url("//cdn.example.com/lib.js"));
        assert!(is_external_url("mailto:a@b.com"));
        assert!(!is_external_url("guide.md"));
        assert!(!is_external_url("/guide.md"));
        assert!(!is_external_url("HTTPS://example.com"));
    }

    #[test]
    fn test_link_kind() {
        assert_eq!(link_kind(""), LinkKind::Invalid);
        assert_eq!(link_kind("#top"), LinkKind::Invalid);
        assert_eq!(link_kind("https://example.com"), LinkKind::External);
        assert_eq!(link_kind("api/intro.md"), LinkKind::Internal);
    }
}
