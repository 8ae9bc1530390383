//! Markdown to HTML with link processing.

use doctree_tree::{EntryId, LinkNotFound, Tree};
use pulldown_cmark::{Options, Parser, html};

use crate::processor::LinkProcessor;
use crate::symbols::SymbolLinker;

/// Result of rendering a page.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML.
    pub html: String,
    /// Links that could not be resolved, in document order.
    pub warnings: Vec<LinkNotFound>,
}

/// Render the markdown of `page` to HTML.
///
/// Internal link targets are rewritten relative to `base_url`, and symbol
/// autolinking runs when a [`SymbolLinker`] is given. Unresolved links are
/// kept as written and reported in [`RenderResult::warnings`].
#[must_use]
pub fn render_html(
    tree: &Tree,
    page: EntryId,
    markdown: &str,
    base_url: &str,
    symbols: Option<&SymbolLinker>,
) -> RenderResult {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM;
    let parser = Parser::new_ext(markdown, options);

    let (events, warnings) = LinkProcessor::new(tree, base_url).process(page, parser);
    let events = match symbols {
        Some(linker) => linker.process(events),
        None => events,
    };

    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, events.into_iter());

    RenderResult {
        html: output,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use doctree_tree::TreeBuilder;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tree() -> (Tree, EntryId) {
        let mut builder = TreeBuilder::new("Docs");
        let root = builder.root();
        builder.add_content(root, "01_setup.md", "Setup", None).unwrap();
        let api = builder.add_directory(root, "api", "API").unwrap();
        let page = builder.add_content(api, "device.md", "Device", None).unwrap();
        (builder.build(), page)
    }

    #[test]
    fn test_render_rewrites_links() {
        let (tree, page) = tree();
        let result = render_html(&tree, page, "[Setup](../setup.md#linux)", "../", None);

        assert_eq!(result.html, "<p><a href=\"../setup.html#linux\">Setup</a></p>\n");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_render_reports_missing_links() {
        let (tree, page) = tree();
        let result = render_html(&tree, page, "[A](a.md#intro) and [B](b.md)", "", None);

        let links: Vec<_> = result.warnings.iter().map(|w| w.link.as_str()).collect();
        assert_eq!(links, vec!["a.md#intro", "b.md"]);
        assert!(result.html.contains("href=\"a.md#intro\""));
    }

    #[test]
    fn test_render_with_symbols() {
        let (tree, page) = tree();
        let linker =
            SymbolLinker::new("[vV]k[A-Z][A-Za-z0-9_]+", "/man/{symbol}.html", Vec::new()).unwrap();
        let markdown = "Call vkCreateDevice, see [setup](!setup).";
        let result = render_html(&tree, page, markdown, "/", Some(&linker));

        assert_eq!(
            result.html,
            "<p>Call <a href=\"/man/vkCreateDevice.html\"><code>vkCreateDevice</code></a>, see <a href=\"/setup.html\">setup</a>.</p>\n"
        );
    }
}
