//! Tree construction errors.

use std::path::PathBuf;

/// Error returned while building or scanning a tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// A directory already has a child under this key.
    #[error("Duplicate entry '{name}' in directory '{parent}'")]
    DuplicateEntry {
        /// Request of the directory.
        parent: String,
        /// Conflicting child key.
        name: String,
    },
    /// Children can only be added to directories.
    #[error("Entry '{0}' is not a directory")]
    NotADirectory(String),
    /// An index page must be one of the directory's own children.
    #[error("Entry '{entry}' is not a child of directory '{directory}'")]
    IndexNotAChild {
        /// Request of the directory.
        directory: String,
        /// Request of the rejected entry.
        entry: String,
    },
    /// The content directory could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
