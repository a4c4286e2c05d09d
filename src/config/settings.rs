use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const API_URL_ENV: &str = "DNSMASQ_API_URL";
pub const API_PORT_ENV: &str = "DNSMASQ_API_PORT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider block as written in the config file. Unset values may be
/// supplied by the environment, see [`Settings::resolve_provider`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_port: Option<u16>,
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_ssl_verify() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_url: None,
            api_port: None,
            ssl_verify: default_ssl_verify(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Fully resolved provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_url: String,
    /// `0` when unset
    pub api_port: u16,
    pub ssl_verify: bool,
    pub timeout: Duration,
}

impl Settings {
    /// Load the config file. A missing file is `Ok(None)`; unreadable or
    /// malformed files are errors.
    pub fn load_optional(config_path: &Path) -> anyhow::Result<Option<Self>> {
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read config file: {}", config_path.display())
                })
            }
        };

        Self::parse(&content, config_path).map(Some)
    }

    fn parse(content: &str, config_path: &Path) -> anyhow::Result<Self> {
        toml::from_str(content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn config_dir() -> PathBuf {
        #[cfg(unix)]
        {
            PathBuf::from("/etc/dnsmasqapi")
        }
        #[cfg(windows)]
        {
            PathBuf::from(r"C:\ProgramData\dnsmasqapi")
        }
    }

    /// Resolve against the process environment.
    pub fn provider_config(&self) -> Result<ProviderConfig> {
        self.resolve_provider(|key| std::env::var(key).ok())
    }

    /// File values win; `env` fills in what the file leaves unset.
    pub fn resolve_provider<F>(&self, env: F) -> Result<ProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = self
            .provider
            .api_url
            .clone()
            .or_else(|| env(API_URL_ENV))
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                Error::config(format!(
                    "api_url is required (set it in the config file or {})",
                    API_URL_ENV
                ))
            })?;

        let api_port = match self.provider.api_port {
            Some(port) => port,
            None => match env(API_PORT_ENV) {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    Error::config(format!("{} is not a valid port: {:?}", API_PORT_ENV, raw))
                })?,
                None => 0,
            },
        };

        if self.provider.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }

        Ok(ProviderConfig {
            api_url,
            api_port,
            ssl_verify: self.provider.ssl_verify,
            timeout: Duration::from_secs(self.provider.timeout_seconds),
        })
    }
}
