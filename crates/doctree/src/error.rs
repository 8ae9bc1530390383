//! CLI error type.

use doctree_config::ConfigError;
use doctree_paths::PathError;
use doctree_tree::{LinkNotFound, TreeError};

/// Everything a command can fail with. Printed once by `main` before exiting 1.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    LinkNotFound(#[from] LinkNotFound),

    #[error("Invalid path: {0}")]
    Path(#[from] PathError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Bad command line input or a failed check.
    #[error("{0}")]
    Validation(String),
}
