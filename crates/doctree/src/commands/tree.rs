//! `doctree tree` command implementation.

use std::path::Path;

use clap::Args;
use doctree_paths::relative_fs_path;
use doctree_tree::{EntryId, EntryKind, Tree};
use serde::Serialize;

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let (config, tree) = global.load_tree()?;

        if self.json {
            let cwd = std::env::current_dir()?;
            let node = TreeNode::build(&tree, tree.root(), &cwd);
            output.print(&serde_json::to_string_pretty(&node)?);
            return Ok(());
        }

        output.note(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        for line in outline(&tree) {
            let marker = if line.is_index { "* " } else { "" };
            output.print(&format!(
                "{}{marker}{} {}",
                "  ".repeat(line.depth),
                line.title,
                output.muted(&line.request)
            ));
        }
        Ok(())
    }
}

/// JSON view of an entry and its descendants.
#[derive(Debug, Serialize)]
struct TreeNode {
    title: String,
    name: String,
    request: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// Build the node for `id`; source paths are shown relative to `cwd`.
    fn build(tree: &Tree, id: EntryId, cwd: &Path) -> Self {
        let entry = tree.entry(id);
        let kind = match entry.kind {
            EntryKind::Directory(_) => "directory",
            EntryKind::Content(_) => "content",
            EntryKind::Raw(_) => "raw",
        };

        Self {
            title: entry.title.clone(),
            name: entry.name.clone(),
            request: entry.request.clone(),
            kind,
            source: entry
                .source_path()
                .map(|source| relative_fs_path(cwd, source)),
            index: tree
                .index_page(id)
                .map(|index| tree.entry(index).request.clone()),
            children: tree
                .children(id)
                .iter()
                .map(|&child| Self::build(tree, child, cwd))
                .collect(),
        }
    }
}

/// One line of the indented tree view.
#[derive(Debug, PartialEq, Eq)]
struct OutlineLine {
    depth: usize,
    title: String,
    request: String,
    is_index: bool,
}

/// Indented view of every entry below the root, in sibling order.
fn outline(tree: &Tree) -> Vec<OutlineLine> {
    fn walk(tree: &Tree, dir: EntryId, depth: usize, lines: &mut Vec<OutlineLine>) {
        let index = tree.index_page(dir);
        for &child in tree.children(dir) {
            let entry = tree.entry(child);
            lines.push(OutlineLine {
                depth,
                title: entry.title.clone(),
                request: entry.request.clone(),
                is_index: index == Some(child),
            });
            walk(tree, child, depth + 1, lines);
        }
    }

    let mut lines = Vec::new();
    walk(tree, tree.root(), 0, &mut lines);
    lines
}
