//! CLI command implementations.

mod check;
mod resolve;
mod tree;

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use clap::Args;
use doctree_config::{CliSettings, Config};
use doctree_paths::{clean, to_absolute_from_cwd};
use doctree_tree::{EntryId, Scanner, Tree};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use tree::TreeArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover doctree.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long, global = true, env = "DOCTREE_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Prefix for generated links (overrides config).
    #[arg(long, global = true, env = "DOCTREE_BASE_URL")]
    base_url: Option<String>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with command line overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let source_dir = self
            .source_dir
            .as_deref()
            .map(absolute_source_dir)
            .transpose()?;
        let cli_settings = CliSettings {
            source_dir,
            base_url: self.base_url.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load configuration and scan the content directory.
    pub(crate) fn load_tree(&self) -> Result<(Config, Tree), CliError> {
        let config = self.load_config()?;
        let tree = Scanner::from_config(&config).scan()?;
        Ok((config, tree))
    }
}

/// Make a command line source directory absolute against the working directory.
///
/// Non-UTF-8 paths are used as given.
fn absolute_source_dir(path: &Path) -> Result<PathBuf, CliError> {
    match path.to_str() {
        Some(path) => Ok(PathBuf::from(to_absolute_from_cwd(path)?)),
        None => Ok(path.to_path_buf()),
    }
}

/// Locate a page given as a request (`api/intro.html`) or a source-relative
/// path (`api/intro.md`, `./api\intro.md`).
fn find_page(tree: &Tree, page: &str) -> Result<EntryId, CliError> {
    let request = clean(page).replace(MAIN_SEPARATOR, "/");
    tree.get(&request)
        .or_else(|| tree.find(tree.root(), &request))
        .ok_or_else(|| CliError::Validation(format!("Page not found: {page}")))
}
