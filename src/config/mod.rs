//! Configuration module for noteboard
//!
//! Settings are layered with the `config` crate: built-in defaults, then
//! `~/.config/noteboard/config.toml`, then `NOTEBOARD_*` environment
//! variables. The file is written back with `toml`.

mod setup;

pub use setup::first_time_setup;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public notes service used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://notehub-public.goit.study/api";

/// Prefix of environment overrides (`NOTEBOARD_TOKEN`, ...)
pub const ENV_PREFIX: &str = "NOTEBOARD";

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct NoteboardConfig {
    /// Base URL of the notes API, without the `/notes` suffix
    pub api_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Notes per page
    pub per_page: u32,

    /// Debounce window for search input, in milliseconds
    pub debounce_ms: u64,

    /// HTTP request timeout, in seconds
    pub request_timeout_secs: u64,

    /// How long fetched pages stay in the cache, in seconds
    pub cache_ttl_secs: u64,

    /// Maximum number of cached pages
    pub cache_capacity: u64,

    /// Age after which a cached page is refetched in the background when shown
    pub stale_after_secs: u64,

    /// Log file, defaults to the user cache directory
    pub log_file: Option<PathBuf>,
}

impl Default for NoteboardConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            per_page: 12,
            debounce_ms: 500,
            request_timeout_secs: 10,
            cache_ttl_secs: 300,
            cache_capacity: 256,
            stale_after_secs: 0,
            log_file: None,
        }
    }
}

impl NoteboardConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("noteboard").join("config.toml"))
    }

    /// Load configuration from the default file and the environment
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment value cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path` and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file or an environment value cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::from_sources(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX).try_parsing(true)
    }

    fn from_sources(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(env)
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the client cannot work with
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Message("api_url must not be empty".to_string()));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Message(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }
        if self.per_page == 0 {
            return Err(ConfigError::Message("per_page must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Save configuration to the default file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Load configuration, running first-time setup if no config file exists
    ///
    /// Setup only runs on an interactive terminal; otherwise defaults apply.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if loading or creating the configuration fails.
    pub fn load_or_setup() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() && std::io::stdin().is_terminal() {
            first_time_setup(&config_path)?;
        }
        Self::load_from(&config_path)
    }

    /// Token with surrounding whitespace removed, `None` when blank
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    #[must_use]
    pub const fn stale_after(&self) -> Duration {
        Duration::from_secs(self.stale_after_secs)
    }

    /// Configured log file or the default location
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(crate::logging::default_log_file)
    }
}
