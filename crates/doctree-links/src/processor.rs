//! Link and image target rewriting.

use doctree_tree::{EntryId, LinkKind, LinkNotFound, ResolutionContext, Tree, link_kind};
use pulldown_cmark::{CowStr, Event, Tag};

/// Resolved internal link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTarget<'u> {
    /// Entry the link points to.
    pub entry: EntryId,
    /// Text after `#`, if present.
    pub fragment: Option<&'u str>,
}

/// Rewrites internal link targets of a page to their published location.
///
/// Invalid targets (empty or bare `#fragment`) and external targets are left
/// untouched. Everything else is resolved against the tree from the page
/// being processed; a target that does not resolve keeps its original text
/// and is reported as a [`LinkNotFound`] warning.
#[derive(Debug, Clone, Copy)]
pub struct LinkProcessor<'a> {
    tree: &'a Tree,
    base_url: &'a str,
}

impl<'a> LinkProcessor<'a> {
    #[must_use]
    pub fn new(tree: &'a Tree, base_url: &'a str) -> Self {
        Self { tree, base_url }
    }

    /// Tree entry and fragment that `url`, as written on `page`, points to.
    ///
    /// Returns `Ok(None)` for invalid and external targets.
    ///
    /// # Errors
    ///
    /// Returns [`LinkNotFound`] carrying `url` as written, fragment included,
    /// when an internal target does not resolve.
    pub fn target<'u>(
        &self,
        page: EntryId,
        url: &'u str,
    ) -> Result<Option<LinkTarget<'u>>, LinkNotFound> {
        if link_kind(url) != LinkKind::Internal {
            return Ok(None);
        }

        let (path, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (url, None),
        };

        let entry = ResolutionContext::new(self.tree, page)
            .resolve(path)
            .map_err(|_| LinkNotFound {
                link: url.to_owned(),
            })?;
        Ok(Some(LinkTarget { entry, fragment }))
    }

    /// Published href for `url` as written on `page`.
    ///
    /// Returns `Ok(None)` for targets that are passed through unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`LinkProcessor::target`].
    pub fn rewrite(&self, page: EntryId, url: &str) -> Result<Option<String>, LinkNotFound> {
        Ok(self.target(page, url)?.map(|target| self.href(&target)))
    }

    /// `base_url + request`, followed by the fragment if any.
    #[must_use]
    pub fn href(&self, target: &LinkTarget<'_>) -> String {
        let mut href = self.tree.href(target.entry, self.base_url);
        if let Some(fragment) = target.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }

    /// Rewrite every link and image target in `events`.
    ///
    /// Returns the rewritten events and the targets that did not resolve.
    pub fn process<'e>(
        &self,
        page: EntryId,
        events: impl IntoIterator<Item = Event<'e>>,
    ) -> (Vec<Event<'e>>, Vec<LinkNotFound>) {
        let mut warnings = Vec::new();

        let events = events
            .into_iter()
            .map(|event| match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => Event::Start(Tag::Link {
                    link_type,
                    dest_url: self.rewrite_dest(page, dest_url, &mut warnings),
                    title,
                    id,
                }),
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => Event::Start(Tag::Image {
                    link_type,
                    dest_url: self.rewrite_dest(page, dest_url, &mut warnings),
                    title,
                    id,
                }),
                other => other,
            })
            .collect();

        (events, warnings)
    }

    fn rewrite_dest<'e>(
        &self,
        page: EntryId,
        dest_url: CowStr<'e>,
        warnings: &mut Vec<LinkNotFound>,
    ) -> CowStr<'e> {
        match self.rewrite(page, &dest_url) {
            Ok(Some(href)) => CowStr::from(href),
            Ok(None) => dest_url,
            Err(e) => {
                tracing::warn!(
                    page = %self.tree.entry(page).request,
                    error = %e,
                    "Unresolved link"
                );
                warnings.push(e);
                dest_url
            }
        }
    }
}
