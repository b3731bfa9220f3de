//! Launcher settings, read from `DATA_HELPER_*` environment variables.
//!
//! | variable                   | default                 |
//! |----------------------------|-------------------------|
//! | `DATA_HELPER_HOST`         | `127.0.0.1`             |
//! | `DATA_HELPER_PORT`         | `3000`                  |
//! | `DATA_HELPER_API_URL`      | `http://localhost:8080` |
//! | `DATA_HELPER_OPEN_BROWSER` | `true`                  |

use common::config::{AppConfig, DEFAULT_API_BASE_URL};
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DATA_HELPER_PORT must be a port number, got `{0}`")]
    InvalidPort(String),
    #[error("DATA_HELPER_OPEN_BROWSER must be true or false, got `{0}`")]
    InvalidFlag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
    pub app: AppConfig,
}

impl LauncherConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match value("DATA_HELPER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let open_browser = match value("DATA_HELPER_OPEN_BROWSER") {
            Some(raw) => parse_flag(&raw)?,
            None => true,
        };

        Ok(Self {
            host: value("DATA_HELPER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            open_browser,
            app: AppConfig {
                api_base_url: value("DATA_HELPER_API_URL")
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            },
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(raw.to_string())),
    }
}
