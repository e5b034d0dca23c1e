//! Export configuration.
//!
//! ```toml
//! output_root = "translation"
//! debug = true
//! templates_dir = "templates"
//!
//! [symbols]
//! external_marker = "@"
//! unbounded_arity = ["@alldiff", "@sum"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use fsgen_types::{EXTERNAL_MARKER, MarkerClassifier};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Directory receiving `data/` and the generated component sources.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// Emit the `data/debug/` explosion.
    #[serde(default)]
    pub debug: bool,
    /// Directory with `<name>.tpl` files overriding the built-in templates.
    #[serde(default)]
    pub templates_dir: Option<PathBuf>,
    #[serde(default)]
    pub symbols: SymbolConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolConfig {
    #[serde(default = "default_marker")]
    pub external_marker: char,
    #[serde(default = "default_unbounded_arity")]
    pub unbounded_arity: Vec<String>,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("translation")
}

const fn default_marker() -> char {
    EXTERNAL_MARKER
}

fn default_unbounded_arity() -> Vec<String> {
    vec!["@alldiff".to_string(), "@sum".to_string()]
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            external_marker: default_marker(),
            unbounded_arity: default_unbounded_arity(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            debug: false,
            templates_dir: None,
            symbols: SymbolConfig::default(),
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref().to_path_buf();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn classifier(&self) -> MarkerClassifier {
        MarkerClassifier::new(
            self.symbols.external_marker,
            self.symbols.unbounded_arity.iter().cloned(),
        )
    }
}
