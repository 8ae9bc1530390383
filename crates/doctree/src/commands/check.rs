//! `doctree check` command implementation.

use std::fs;
use std::io;

use clap::Args;
use doctree_links::{SymbolLinker, render_html};
use doctree_tree::{LinkNotFound, Tree};

use super::GlobalArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Fail when any link does not resolve or a page cannot be read.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    pub(crate) fn execute(self, global: &GlobalArgs) -> Result<(), CliError> {
        let output = Output::new();
        let (config, tree) = global.load_tree()?;

        let symbols = config
            .symbols
            .as_ref()
            .map(SymbolLinker::from_config)
            .transpose()
            .map_err(|e| CliError::Validation(format!("Invalid symbol pattern: {e}")))?;

        let report = check_pages(&tree, config.base_url(), symbols.as_ref());
        for (request, error) in &report.unreadable {
            output.warn(&format!("{request}: skipped, cannot read source: {error}"));
        }
        for (request, warning) in &report.warnings {
            output.warn(&format!("{request}: {warning}"));
        }

        if report.is_clean() {
            output.ok(&format!("Checked {} pages, all links resolve", report.pages));
            return Ok(());
        }

        let summary = format!(
            "Checked {} pages, {} unresolved links, {} unreadable pages",
            report.pages,
            report.warnings.len(),
            report.unreadable.len()
        );
        if self.strict {
            return Err(CliError::Validation(summary));
        }
        output.warn(&summary);
        Ok(())
    }
}

/// Outcome of checking every page.
#[derive(Debug, Default)]
struct CheckReport {
    pages: usize,
    /// Page request and the link that failed on it.
    warnings: Vec<(String, LinkNotFound)>,
    /// Pages whose source could not be read, with the read error.
    unreadable: Vec<(String, io::Error)>,
}

impl CheckReport {
    fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.unreadable.is_empty()
    }
}

/// Render every content page that has a source file and collect its
/// unresolved links. Pages that cannot be read are recorded and skipped.
fn check_pages(tree: &Tree, base_url: &str, symbols: Option<&SymbolLinker>) -> CheckReport {
    let mut report = CheckReport::default();

    for page in tree.content_pages() {
        let entry = tree.entry(page);
        let Some(source) = entry.source_path() else {
            continue;
        };

        let markdown = match fs::read_to_string(source) {
            Ok(markdown) => markdown,
            Err(e) => {
                tracing::warn!(page = %entry.request, error = %e, "Cannot read page source");
                report.unreadable.push((entry.request.clone(), e));
                continue;
            }
        };
        let result = render_html(tree, page, &markdown, base_url, symbols);
        tracing::debug!(page = %entry.request, warnings = result.warnings.len(), "Checked page");

        report.pages += 1;
        report.warnings.extend(
            result
                .warnings
                .into_iter()
                .map(|warning| (entry.request.clone(), warning)),
        );
    }

    report
}
