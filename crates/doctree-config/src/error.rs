use std::env::VarError;
use std::path::PathBuf;

/// Errors raised while loading or validating `doctree.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of its allowed range.
    #[error("Invalid config: {0}")]
    Validation(String),

    /// `${VAR}` could not be expanded in `field`.
    #[error("Cannot expand ${{{var}}} in {field}: {source}")]
    EnvVar {
        field: String,
        var: String,
        #[source]
        source: VarError,
    },
}
