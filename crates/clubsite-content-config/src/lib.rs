use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_MEDIA_URL_PREFIX: &str = "/media";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory of `<id>.json` article files
    pub articles_path: PathBuf,
    /// Where uploaded media is written
    pub media_path: PathBuf,
    /// Public URL prefix under which `media_path` is served
    #[serde(default = "default_media_url_prefix")]
    pub media_url_prefix: String,
}

fn default_media_url_prefix() -> String {
    DEFAULT_MEDIA_URL_PREFIX.to_string()
}

impl Config {
    /// Config for an articles directory given on the command line, with
    /// media kept in a `media` folder beside it
    pub fn for_articles_dir<P: AsRef<Path>>(articles_path: P) -> Self {
        let articles_path = articles_path.as_ref();
        let articles_path =
            Self::expand_path(articles_path).unwrap_or_else(|| articles_path.to_path_buf());
        let media_path = articles_path
            .parent()
            .map(|parent| parent.join("media"))
            .unwrap_or_else(|| PathBuf::from("media"));
        Self {
            articles_path,
            media_path,
            media_url_prefix: default_media_url_prefix(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.articles_path =
            Self::expand_path(&config.articles_path).unwrap_or(config.articles_path);
        config.media_path = Self::expand_path(&config.media_path).unwrap_or(config.media_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Write this config to `config_path` unless a config file is already
    /// there. Returns whether it was written.
    pub fn save_if_missing<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<bool> {
        let config_path = config_path.as_ref();
        if Self::load_from_path(config_path)?.is_some() {
            return Ok(false);
        }
        self.save_to_path(config_path)?;
        Ok(true)
    }

    fn save_to_path(&self, config_path: &Path) -> anyhow::Result<()> {
        let config_path: &Path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/clubsite-content");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
