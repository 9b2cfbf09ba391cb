use folio_store::{ServiceConfig, DEFAULT_SEARCH_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding versions, pages and templates
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Author recorded on new pages and templates
    #[serde(default = "default_author")]
    pub author: String,

    /// Pages scanned by `folio search`
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_store_dir() -> String {
    ".folio".to_string()
}

fn default_author() -> String {
    "anonymous".to_string()
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Get absolute path to the store directory
    pub fn get_store_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.store_dir)
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            search_limit: self.search_limit,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: default_store_dir(),
            author: default_author(),
            search_limit: default_search_limit(),
        }
    }
}
