use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::autosave::DEFAULT_WORD_THRESHOLD;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AutosaveConfig {
    #[serde(default = "default_word_threshold")]
    pub word_threshold: usize,
    /// Where `update` writes a copy of a document once it crosses the
    /// threshold. Auto-export is off when unset.
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            word_threshold: default_word_threshold(),
            export_dir: None,
        }
    }
}

fn default_word_threshold() -> usize {
    DEFAULT_WORD_THRESHOLD
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["txt".to_string(), "md".to_string()]
}

impl ImportConfig {
    /// Case-insensitive check of a file extension against the allow list.
    pub fn allows(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }
}

impl Config {
    /// Defaults for commands that never open the database.
    pub fn minimal() -> Self {
        Self {
            db: DbConfig {
                path: PathBuf::from("./data/shelf.sqlite"),
            },
            autosave: AutosaveConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.autosave.word_threshold == 0 {
        bail!("autosave.word_threshold must be > 0");
    }

    if config.import.extensions.is_empty() {
        bail!("import.extensions must list at least one extension");
    }

    for ext in &config.import.extensions {
        if ext.trim().is_empty() {
            bail!("import.extensions must not contain empty entries");
        }
        if ext.starts_with('.') {
            bail!(
                "import.extensions entry '{}' must not start with '.' (use '{}')",
                ext,
                ext.trim_start_matches('.')
            );
        }
    }

    Ok(())
}
