//! `doctree.toml` loading.
//!
//! [`Config::load`] reads an explicit file or the first `doctree.toml` found
//! walking up from the working directory, falling back to defaults when there
//! is none. Relative paths in the file are taken from the file's directory.
//!
//! `docs.base_url`, `docs.image` and `symbols.url` may reference environment
//! variables as `${VAR}` or `${VAR:-default}`. An unset variable without a
//! default is an error.

mod error;
mod expand;

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

pub use error::ConfigError;

const CONFIG_FILENAME: &str = "doctree.toml";

/// Stands for the current base URL inside templated values such as `docs.image`.
const BASE_URL_PLACEHOLDER: &str = "<base_url>";

/// Replaced by the symbol name in `symbols.url`.
pub const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// Values given on the command line. `Some` fields win over the file.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub source_dir: Option<PathBuf>,
    pub base_url: Option<String>,
}

/// Loaded configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `[docs]` exactly as written; see `docs_resolved` for usable values.
    docs: DocsSection,
    pub ignore: IgnoreConfig,
    /// `[symbols]`, absent unless configured.
    pub symbols: Option<SymbolsConfig>,

    /// `[docs]` with defaults filled in and paths made absolute.
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// File the configuration came from, if any.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults_in(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsSection {
    source_dir: Option<PathBuf>,
    content_extensions: Option<Vec<String>>,
    base_url: Option<String>,
    image: Option<String>,
}

/// Settings of the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    pub source_dir: PathBuf,
    /// Extensions (no leading dot) that make a file a content page.
    pub content_extensions: Vec<String>,
    /// Prefix of every generated href.
    pub base_url: String,
    /// Logo location, possibly containing `<base_url>`.
    pub image_template: Option<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("docs"),
            content_extensions: vec!["md".to_owned(), "markdown".to_owned()],
            base_url: String::new(),
            image_template: None,
        }
    }
}

impl DocsConfig {
    /// Logo location for the current base URL.
    #[must_use]
    pub fn image(&self) -> Option<String> {
        let template = self.image_template.as_deref()?;
        Some(template.replace(BASE_URL_PLACEHOLDER, &self.base_url))
    }

    /// Exact, case-sensitive match against `content_extensions`.
    #[must_use]
    pub fn is_content_extension(&self, extension: &str) -> bool {
        self.content_extensions.iter().any(|ext| ext == extension)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.content_extensions.is_empty() {
            return Err(invalid("docs.content_extensions must list at least one extension"));
        }
        for ext in &self.content_extensions {
            if ext.is_empty() {
                return Err(invalid("docs.content_extensions contains an empty extension"));
            }
            if ext.starts_with('.') {
                return Err(invalid(format!(
                    "docs.content_extensions: write '{}' without the leading dot",
                    ext.trim_start_matches('.')
                )));
            }
        }
        Ok(())
    }
}

/// Names the scanner never descends into or picks up.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    pub files: Vec<String>,
    pub folders: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            files: vec!["Thumbs.db".to_owned()],
            folders: Vec::new(),
        }
    }
}

/// `[symbols]`: autolinking of API names to a reference site.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolsConfig {
    /// Regex a symbol must match.
    pub pattern: String,
    /// Reference page URL with `{symbol}` in it.
    pub url: String,
    /// Substrings that exclude a symbol from linking.
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl SymbolsConfig {
    /// Check that `pattern` compiles and `url` has a `{symbol}` slot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pattern.is_empty() {
            return Err(invalid("symbols.pattern is empty"));
        }
        if let Err(e) = Regex::new(&self.pattern) {
            return Err(invalid(format!("symbols.pattern does not compile: {e}")));
        }
        if !self.url.contains(SYMBOL_PLACEHOLDER) {
            return Err(invalid(format!(
                "symbols.url has no {SYMBOL_PLACEHOLDER} placeholder"
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

impl Config {
    /// Load the configuration and apply command line overrides on top.
    ///
    /// # Errors
    ///
    /// Fails when an explicit `config_path` is missing, or when the file
    /// cannot be read, parsed, expanded or validated.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir().ok().and_then(|cwd| find_config_file(&cwd)),
        };

        let mut config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading configuration");
                Self::from_file(&path)?
            }
            None => Self::defaults_in(&std::env::current_dir().unwrap_or_default()),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.rebase(base_url);
        }
    }

    /// Switch every generated link to a new prefix.
    ///
    /// Templated values such as [`DocsConfig::image`] follow the new prefix.
    /// Rebasing to the current base URL does nothing.
    pub fn rebase(&mut self, base_url: &str) {
        if self.docs_resolved.base_url == base_url {
            return;
        }
        tracing::debug!(
            from = %self.docs_resolved.base_url,
            to = %base_url,
            "Rebasing configuration"
        );
        base_url.clone_into(&mut self.docs_resolved.base_url);
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.docs_resolved.base_url
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.docs_resolved.validate()?;
        self.symbols.as_ref().map_or(Ok(()), SymbolsConfig::validate)
    }

    /// Defaults with the content directory at `base/docs`.
    fn defaults_in(base: &Path) -> Self {
        Self {
            docs: DocsSection::default(),
            ignore: IgnoreConfig::default(),
            symbols: None,
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                ..DocsConfig::default()
            },
            config_path: None,
        }
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
        config.expand_env_vars()?;
        config.resolve(path.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let docs = &mut self.docs;
        for (value, field) in [
            (&mut docs.base_url, "docs.base_url"),
            (&mut docs.image, "docs.image"),
        ] {
            if let Some(raw) = value.as_deref() {
                *value = Some(expand::expand_env(raw, field)?);
            }
        }
        if let Some(symbols) = &mut self.symbols {
            symbols.url = expand::expand_env(&symbols.url, "symbols.url")?;
        }
        Ok(())
    }

    /// Fill `docs_resolved` from `[docs]`, anchoring paths at `config_dir`.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = DocsConfig::default();
        let docs = &self.docs;
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(docs.source_dir.as_ref().unwrap_or(&defaults.source_dir)),
            content_extensions: docs
                .content_extensions
                .clone()
                .unwrap_or(defaults.content_extensions),
            base_url: docs.base_url.clone().unwrap_or(defaults.base_url),
            image_template: docs.image.clone(),
        };
    }
}

/// First `doctree.toml` in `start` or one of its ancestors.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn symbols() -> SymbolsConfig {
        SymbolsConfig {
            pattern: "[vV]k[A-Z][A-Za-z0-9_]+".to_owned(),
            url: "https://example.com/{symbol}.html".to_owned(),
            exclude: Vec::new(),
        }
    }

    fn validation_message(config: &Config) -> String {
        match config.validate() {
            Err(ConfigError::Validation(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::defaults_in(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.docs_resolved.content_extensions, vec!["md", "markdown"]);
        assert_eq!(config.base_url(), "");
        assert_eq!(config.ignore.files, vec!["Thumbs.db"]);
        assert!(config.symbols.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_parses() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.symbols.is_none());
        assert!(config.ignore.folders.is_empty());
    }

    #[test]
    fn test_resolve_docs_section() {
        let toml = r#"
[docs]
source_dir = "content"
content_extensions = ["md", "txt"]
base_url = "/manual/"
image = "<base_url>img/logo.png"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/content"));
        assert_eq!(config.docs_resolved.content_extensions, vec!["md", "txt"]);
        assert_eq!(config.base_url(), "/manual/");
        assert_eq!(config.docs_resolved.image().as_deref(), Some("/manual/img/logo.png"));
    }

    #[test]
    fn test_parse_ignore_and_symbols() {
        let toml = r#"
[ignore]
files = ["draft.md"]
folders = ["node_modules", "vendor"]

[symbols]
pattern = "[vV]k[A-Z][A-Za-z0-9_]+"
url = "https://registry.example.com/man/{symbol}.html"
exclude = ["KHR", "EXT"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.ignore.files, vec!["draft.md"]);
        assert_eq!(config.ignore.folders, vec!["node_modules", "vendor"]);
        let symbols = config.symbols.unwrap();
        assert_eq!(symbols.exclude, vec!["KHR", "EXT"]);
        assert!(symbols.validate().is_ok());
    }

    #[test]
    fn test_rebase_substitutes_image() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.docs_resolved.image_template = Some("<base_url>logo.png".to_owned());

        config.rebase("../../");
        assert_eq!(config.base_url(), "../../");
        assert_eq!(config.docs_resolved.image().as_deref(), Some("../../logo.png"));

        config.rebase("/");
        assert_eq!(config.docs_resolved.image().as_deref(), Some("/logo.png"));
    }

    #[test]
    fn test_rebase_to_same_url() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.rebase("/docs/");
        let before = config.docs_resolved.clone();

        config.rebase("/docs/");
        assert_eq!(config.docs_resolved, before);
    }

    #[test]
    fn test_cli_settings_override() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            base_url: Some("https://docs.example.com/".to_owned()),
        });

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/custom/docs"));
        assert_eq!(config.base_url(), "https://docs.example.com/");
    }

    #[test]
    fn test_cli_settings_empty() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.base_url(), "");
    }

    #[test]
    fn test_is_content_extension() {
        let docs = DocsConfig::default();
        assert!(docs.is_content_extension("md"));
        assert!(docs.is_content_extension("markdown"));
        assert!(!docs.is_content_extension("MD"));
        assert!(!docs.is_content_extension("png"));
    }

    #[test]
    fn test_load_file_paths_relative_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[docs]\nsource_dir = \"pages\"\n").unwrap();

        let config = Config::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, temp_dir.path().join("pages"));
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/doctree.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILENAME);
        fs::write(&config_path, "[docs]\ncontent_extensions = []\n").unwrap();

        let err = Config::load(Some(&config_path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_find_config_file_in_ancestor() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested = temp_dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "").unwrap();

        assert_eq!(
            find_config_file(&nested),
            Some(temp_dir.path().join(CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_expand_env_base_url() {
        // SAFETY: the variable is unique to this test
        unsafe {
            std::env::set_var("DOCTREE_TEST_BASE", "/preview/");
        }

        let mut config: Config = toml::from_str("[docs]\nbase_url = \"${DOCTREE_TEST_BASE}\"\n").unwrap();
        config.expand_env_vars().unwrap();
        config.resolve(Path::new("/project"));
        assert_eq!(config.base_url(), "/preview/");

        unsafe {
            std::env::remove_var("DOCTREE_TEST_BASE");
        }
    }

    #[test]
    fn test_validate_empty_extensions() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.docs_resolved.content_extensions.clear();
        assert!(validation_message(&config).contains("at least one"));
    }

    #[test]
    fn test_validate_extension_with_dot() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.docs_resolved.content_extensions = vec![".md".to_owned()];
        assert!(validation_message(&config).contains("'md' without the leading dot"));
    }

    #[test]
    fn test_validate_symbols() {
        let mut config = Config::defaults_in(Path::new("/test"));
        config.symbols = Some(symbols());
        assert!(config.validate().is_ok());

        config.symbols = Some(SymbolsConfig {
            pattern: "[unclosed".to_owned(),
            ..symbols()
        });
        assert!(validation_message(&config).starts_with("symbols.pattern"));

        config.symbols = Some(SymbolsConfig {
            url: "https://example.com/".to_owned(),
            ..symbols()
        });
        assert!(validation_message(&config).contains("{symbol}"));
    }
}
