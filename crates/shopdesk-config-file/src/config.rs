use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML in {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopdeskConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overrides the client's default `User-Agent`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session file location; `~` is expanded
    #[serde(default = "default_session_path")]
    pub path: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: None,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl ShopdeskConfig {
    /// Parse a config file; `.toml` files are read as TOML, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = expand_path(&path.as_ref().to_string_lossy());
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                path: path.clone(),
                source,
            })?
        } else {
            // Default to YAML; an empty file yields the defaults
            if contents.trim().is_empty() {
                Self::default()
            } else {
                serde_yaml::from_str(&contents).map_err(|source| ConfigError::Yaml {
                    path: path.clone(),
                    source,
                })?
            }
        };

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolve the effective configuration
    ///
    /// An explicit path must exist. Without one, `~/.shopdesk/config.yaml` is
    /// used when present and built-in defaults otherwise. Environment
    /// variables are applied last, then the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(default) => Self::from_file(default)?,
                None => Self::default(),
            },
        };

        // Logging isn't set up yet
        for warning in config.merge_env() {
            eprintln!("Warning: {}", warning);
        }
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    ///
    /// Returns a message for each variable that was set but ignored.
    pub fn merge_env(&mut self) -> Vec<String> {
        let mut ignored = Vec::new();

        if let Ok(val) = std::env::var("SHOPDESK_API_URL") {
            self.api.base_url = val;
        }

        if let Ok(val) = std::env::var("SHOPDESK_SESSION_FILE") {
            self.session.path = val;
        }

        if let Ok(val) = std::env::var("SHOPDESK_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("SHOPDESK_LOG_FORMAT") {
            match val.parse() {
                Ok(format) => self.logging.format = format,
                Err(_) => ignored.push(format!(
                    "Invalid SHOPDESK_LOG_FORMAT '{}', keeping {:?}",
                    val, self.logging.format
                )),
            }
        }

        ignored
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        let url = Url::parse(base_url).map_err(|e| {
            ConfigError::Invalid(format!("api.base_url '{}' is not a valid URL: {}", base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "api.base_url must use http or https, got '{}'",
                base_url
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(ConfigError::Invalid(format!(
                "api.base_url has no host: '{}'",
                base_url
            )));
        }

        if self.session.path.trim().is_empty() {
            return Err(ConfigError::Invalid("session.path must not be empty".to_string()));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.level must not be empty".to_string()));
        }

        Ok(())
    }

    /// Session file location with `~` expanded
    pub fn session_path(&self) -> PathBuf {
        expand_path(&self.session.path)
    }
}

/// `~/.shopdesk/config.yaml`, if the home directory is known
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".shopdesk").join("config.yaml"))
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

fn default_base_url() -> String {
    "https://api.escuelajs.co/api/v1".to_string()
}

fn default_session_path() -> String {
    "~/.shopdesk/session.json".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}
