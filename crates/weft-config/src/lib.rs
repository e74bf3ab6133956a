//! `weft.toml`: parser switches, lint levels and extra dialect extensions.
//!
//! ```toml
//! [parser]
//! location = false
//!
//! [lint]
//! code-block-language = "warn"
//!
//! [dialects]
//! mdoc = "mdx"
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;
use weft_lint::LintConfig;
use weft_parse::{Dialect, ParserOptions};

pub const CONFIG_FILE_NAME: &str = "weft.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read { path: Utf8PathBuf, source: std::io::Error },

    #[error("failed to parse config file at {path}: {source}")]
    Parse { path: Utf8PathBuf, source: toml::de::Error },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeftConfig {
    pub parser: ParserSection,
    /// Rule name to level: `"error"`, `"warn"` or anything else to disable.
    pub lint: FxHashMap<String, String>,
    /// File extension to dialect name.
    pub dialects: FxHashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSection {
    pub location: bool,
}

impl Default for ParserSection {
    fn default() -> Self {
        Self { location: true }
    }
}

fn dialect_by_name(name: &str) -> Option<Dialect> {
    match name.to_ascii_lowercase().as_str() {
        "markdown" | "md" => Some(Dialect::Markdown),
        "mdx" => Some(Dialect::Mdx),
        "template" | "vue" => Some(Dialect::Template),
        _ => None,
    }
}

impl WeftConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load_from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {path}, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Looks for `weft.toml` in `dir` and its ancestors.
    pub fn discover(dir: &Utf8Path) -> Result<Self, ConfigError> {
        match dir.ancestors().map(|dir| dir.join(CONFIG_FILE_NAME)).find(|path| path.exists()) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn lint_config(&self) -> LintConfig {
        LintConfig::from_levels(self.lint.iter().map(|(rule, level)| (&**rule, &**level)))
    }

    /// Dialect for a file, from the configured extensions first and the
    /// built-in ones second.
    pub fn dialect_for(&self, path: &Utf8Path) -> Option<Dialect> {
        let extension = path.extension()?;
        match self.dialects.get(extension) {
            Some(name) => {
                let dialect = dialect_by_name(name);
                if dialect.is_none() {
                    log::warn!("unknown dialect `{name}` for extension `{extension}`");
                }
                dialect
            }
            None => Dialect::from_extension(extension),
        }
    }

    pub fn parser_options(&self, path: &Utf8Path) -> Option<ParserOptions> {
        Some(ParserOptions {
            dialect: self.dialect_for(path)?,
            location: self.parser.location,
            lint: self.lint_config(),
        })
    }
}
