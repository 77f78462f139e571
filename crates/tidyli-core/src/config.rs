//! Configuration for review sessions and the decision-log server

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file could not be read
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// TidyLi configuration (`~/.tidyli/config.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding profiles.csv, pictures.csv, messages.csv and the decision logs
    pub data_dir: PathBuf,

    /// Address the server binds to
    pub bind: String,

    /// Port the server listens on
    pub port: u16,

    /// Base URL of a running server; when set, keep/remove decisions are mirrored to it
    pub server_url: Option<String>,

    /// Category a review session starts in
    pub default_category: Category,

    /// Where export files are written
    pub export_dir: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bind: "127.0.0.1".to_string(),
            port: 3000,
            server_url: None,
            default_category: Category::Pending,
            export_dir: PathBuf::from("."),
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tidyli_storage::read_json_or_default(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
