//! Top-level application configuration.
//!
//! Configuration is stored in `.command-centre/config.yaml` and includes:
//! - The operations API base URL and request timeout
//! - Defaults for the bookings screen (page size, poll interval, auto-refresh)
//! - The session token written by `login` and cleared on logout or a 401

use std::env;
use std::fmt;
use std::fs;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CentreError, Result};
use crate::paths::config_path;

/// Environment override for the API base URL
pub const API_URL_ENV: &str = "COMMAND_CENTRE_API_URL";

/// Environment override for the session token
pub const TOKEN_ENV: &str = "COMMAND_CENTRE_TOKEN";

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: &[&str] = &[
    "api_base_url",
    "request_timeout",
    "poll_interval",
    "page_size",
    "auto_refresh",
];

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the operations API (e.g. https://ops.example.com)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Auto-refresh period in seconds (default: 10)
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,

    /// Default page size for list screens (default: 25)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Whether the bookings screen starts with auto-refresh on (default: true)
    #[serde(default = "default_auto_refresh")]
    pub auto_refresh: bool,

    /// Session credentials
    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_poll_interval() -> u64 {
    10
}

fn default_page_size() -> u32 {
    25
}

fn default_auto_refresh() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: None,
            request_timeout: default_request_timeout(),
            poll_interval: default_poll_interval(),
            page_size: default_page_size(),
            auto_refresh: default_auto_refresh(),
            auth: AuthConfig::default(),
        }
    }
}

/// Session credentials persisted between runs
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthConfig {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.email.is_none()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("email", &self.email)
            .finish()
    }
}

impl Config {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            CentreError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let path = config_path();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CentreError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            CentreError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        // Owner read/write only: the file holds the session token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&path, permissions)?;
        }

        Ok(())
    }

    /// Reject values the rest of the program cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CentreError::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }
        if self.poll_interval == 0 {
            return Err(CentreError::Config(
                "poll_interval must be greater than 0".to_string(),
            ));
        }
        if let Some(url) = &self.api_base_url {
            parse_base_url(url)?;
        }
        Ok(())
    }

    /// API base URL from environment or config file
    pub fn api_base_url(&self) -> Result<Url> {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            return parse_base_url(&url);
        }

        let url = self.api_base_url.as_deref().ok_or_else(|| {
            CentreError::Config(
                "API base URL not configured. Set COMMAND_CENTRE_API_URL or run: command-centre config set api_base_url <url>".to_string(),
            )
        })?;
        parse_base_url(url)
    }

    /// Session token from environment or config file
    pub fn access_token(&self) -> Option<SecretString> {
        if let Ok(token) = env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            return Some(SecretString::from(token));
        }

        self.auth
            .access_token
            .as_ref()
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.clone()))
    }

    /// Store a fresh session
    pub fn set_session(&mut self, email: String, token: String) {
        self.auth = AuthConfig {
            access_token: Some(token),
            email: Some(email),
        };
    }

    /// Forget the session token, keeping the remembered email
    pub fn clear_session(&mut self) {
        self.auth.access_token = None;
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Read a config value by key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_base_url" => self.api_base_url.clone().unwrap_or_default(),
            "request_timeout" => self.request_timeout.to_string(),
            "poll_interval" => self.poll_interval.to_string(),
            "page_size" => self.page_size.to_string(),
            "auto_refresh" => self.auto_refresh.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a config value by key, validating it first
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_base_url" => {
                parse_base_url(value)?;
                self.api_base_url = Some(value.trim_end_matches('/').to_string());
            }
            "request_timeout" => self.request_timeout = parse_number(key, value)?,
            "poll_interval" => {
                let seconds: u64 = parse_number(key, value)?;
                if seconds == 0 {
                    return Err(CentreError::InvalidInput(
                        "poll_interval must be greater than 0".to_string(),
                    ));
                }
                self.poll_interval = seconds;
            }
            "page_size" => {
                let size: u32 = parse_number(key, value)?;
                if size == 0 {
                    return Err(CentreError::InvalidInput(
                        "page_size must be greater than 0".to_string(),
                    ));
                }
                self.page_size = size;
            }
            "auto_refresh" => {
                self.auto_refresh = match value.to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        return Err(CentreError::InvalidInput(format!(
                            "auto_refresh expects true/false, got '{value}'"
                        )));
                    }
                }
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> CentreError {
    CentreError::InvalidInput(format!(
        "unknown config key '{}', expected one of: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CentreError::InvalidInput(format!("{key} expects a number, got '{value}'")))
}

/// Parse and sanity-check an API base URL
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| CentreError::Config(format!("invalid API base URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CentreError::Config(format!(
            "API base URL must be http or https, got '{other}'"
        ))),
    }
}
