//! `doctree resolve` command implementation.

use clap::Args;
use doctree_links::{LinkProcessor, LinkTarget};
use doctree_paths::relative_path;
use doctree_tree::{EntryId, Tree};

use super::{GlobalArgs, find_page};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Link as written in the page (e.g., `../guide.md#setup`).
    link: String,

    /// Page the link is written on (default: the root).
    #[arg(short, long)]
    from: Option<String>,
}

impl ResolveArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let (config, tree) = global.load_tree()?;

        let page = match &self.from {
            Some(from) => find_page(&tree, from)?,
            None => tree.root(),
        };

        let processor = LinkProcessor::new(&tree, config.base_url());
        let Some(target) = processor.target(page, &self.link)? else {
            output.note("Link is external or a bare fragment; left unchanged");
            output.print(&self.link);
            return Ok(());
        };

        let entry = tree.entry(target.entry);
        output.print(&format!("request:  {}", entry.request));
        output.print(&format!("href:     {}", processor.href(&target)));
        output.print(&format!("relative: {}", page_relative(&tree, page, &target)));
        if let Some(source) = entry.source_path() {
            output.print(&format!("source:   {}", source.display()));
        }
        Ok(())
    }
}

/// Path from `page` to the target, as a link written on that page.
fn page_relative(tree: &Tree, page: EntryId, target: &LinkTarget<'_>) -> String {
    let from = format!("/{}", tree.entry(page).request);
    let to = format!("/{}", tree.entry(target.entry).request);
    let mut relative = relative_path(&from, &to);
    if let Some(fragment) = target.fragment {
        relative.push('#');
        relative.push_str(fragment);
    }
    relative
}

#[cfg(test)]
mod tests {
    use doctree_tree::TreeBuilder;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_relative() {
        let mut builder = TreeBuilder::new("Docs");
        let root = builder.root();
        let guide = builder.add_content(root, "guide.md", "Guide", None).unwrap();
        let api = builder.add_directory(root, "api", "API").unwrap();
        let intro = builder.add_content(api, "intro.md", "Intro", None).unwrap();
        let tree = builder.build();

        let target = LinkTarget {
            entry: guide,
            fragment: Some("setup"),
        };
        assert_eq!(page_relative(&tree, intro, &target), "../guide.html#setup");

        let target = LinkTarget {
            entry: intro,
            fragment: None,
        };
        assert_eq!(page_relative(&tree, guide, &target), "api/intro.html");
    }
}
