//! Application configuration: YAML file, environment overrides and data paths.

use std::fs;
use std::path::{Path, PathBuf};

use platform_dirs::AppDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{is_valid_language_code, DEFAULT_UI_LANGUAGE};
use crate::logger::LogConfig;
use crate::query_builder::QuoteHandling;

const APP_NAME: &str = "wiki-search-builder";
const CONFIG_FILE: &str = "config.yaml";

pub const ENV_LANG: &str = "WIKI_SEARCH_LANG";
pub const ENV_DATA_DIR: &str = "WIKI_SEARCH_DATA_DIR";

/// Upper bound for `cache_ttl_hours` (ten years).
pub const MAX_CACHE_TTL_HOURS: i64 = 24 * 365 * 10;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub ui_language: String,
    /// Wiki to search. Follows the UI language when unset.
    pub target_language: Option<String>,
    pub result_limit: usize,
    pub summary_concurrency: usize,
    pub request_timeout_secs: u64,
    pub cache_ttl_hours: i64,
    pub translations_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub quote_handling: QuoteHandling,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ui_language: DEFAULT_UI_LANGUAGE.to_string(),
            target_language: None,
            result_limit: 10,
            summary_concurrency: 4,
            request_timeout_secs: 15,
            cache_ttl_hours: 24,
            translations_dir: None,
            data_dir: None,
            quote_handling: QuoteHandling::Escape,
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = AppPaths::resolve(None).config_file();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(lang) = std::env::var(ENV_LANG) {
            if !lang.trim().is_empty() {
                self.ui_language = lang.trim().to_string();
            }
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_language_code(&self.ui_language) {
            return Err(ConfigError::Invalid(format!(
                "ui_language '{}' is not a language code",
                self.ui_language
            )));
        }
        if let Some(target) = &self.target_language {
            if !is_valid_language_code(target) {
                return Err(ConfigError::Invalid(format!(
                    "target_language '{}' is not a language code",
                    target
                )));
            }
        }
        if self.result_limit == 0 {
            return Err(ConfigError::Invalid("result_limit must be at least 1".to_string()));
        }
        if self.summary_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "summary_concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(1..=MAX_CACHE_TTL_HOURS).contains(&self.cache_ttl_hours) {
            return Err(ConfigError::Invalid(format!(
                "cache_ttl_hours must be between 1 and {}",
                MAX_CACHE_TTL_HOURS
            )));
        }
        Ok(())
    }

    pub fn paths(&self) -> AppPaths {
        AppPaths::resolve(self.data_dir.as_deref())
    }
}

/// Filesystem locations used by the application.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
}

impl AppPaths {
    pub fn resolve(data_dir_override: Option<&Path>) -> Self {
        let dirs = AppDirs::new(Some(APP_NAME), false);
        let config_dir = dirs
            .as_ref()
            .map(|d| d.config_dir.clone())
            .unwrap_or_else(|| PathBuf::from("./config"));
        let data_dir = match data_dir_override {
            Some(dir) => dir.to_path_buf(),
            None => dirs
                .map(|d| d.data_dir)
                .unwrap_or_else(|| PathBuf::from("./data")),
        };
        Self { data_dir, config_dir }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    pub fn database_file(&self) -> PathBuf {
        self.data_dir.join("wiki_search.db")
    }

    pub fn log_directory(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn ensure_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}
