use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "learnora";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const API_URL_ENV: &str = "LEARNORA_API_URL";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Client settings, read from `config.yaml`.
///
/// ```yaml
/// api_base_url: http://localhost:5000
/// display_name: Ada
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    /// Shown in the dashboard header when set.
    #[serde(default)]
    pub display_name: Option<String>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            display_name: None,
        }
    }
}

impl ClientConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: ClientConfig = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Resolve the effective config.
    ///
    /// An explicit `path` must exist; otherwise the default location is read
    /// when present. `api_url_override` (CLI flag or environment) wins over
    /// whatever the file says.
    pub fn load(path: Option<&Path>, api_url_override: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match default_config_path() {
                Some(p) if p.exists() => {
                    log::debug!("[CONFIG] Reading {}", p.display());
                    Self::from_file(&p)?
                }
                _ => Self::default(),
            },
        };

        if let Some(url) = api_url_override.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_base_url = url.to_string();
        }

        Ok(config)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.yaml"))
}

/// Where the TUI writes its log, since stderr belongs to the terminal UI.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("learnora.log")
}
