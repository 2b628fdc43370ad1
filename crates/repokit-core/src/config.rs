//! Configuration management for repokit
//!
//! Handles loading, saving, and resolving the per-host API settings,
//! with support for atomic saves, platform-specific paths and
//! environment overrides.

use crate::api::{ApiClient, ClientSettings};
use crate::error::{ConfigError, Result};
use crate::models::{normalize_host, AppConfig, CURRENT_CONFIG_VERSION};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Overrides the config directory
pub const CONFIG_HOME_ENV: &str = "REPOKIT_CONFIG_HOME";
/// Token used for every host, ahead of the config file
pub const TOKEN_ENV: &str = "REPOKIT_TOKEN";
/// Fallback token variable
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";
/// REST base URL used for every host
pub const API_URL_ENV: &str = "REPOKIT_API_URL";

/// Manages the application configuration
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Directory where config file is stored
    config_dir: PathBuf,
    /// Environment snapshot consulted for overrides
    env: HashMap<String, String>,
}

impl ConfigManager {
    /// Create a new ConfigManager with an explicit directory and no
    /// environment overrides.
    ///
    /// This is the primary constructor, supporting dependency injection
    /// for testing without environment variable manipulation.
    pub fn new(config_dir: PathBuf) -> Self {
        Self {
            config_dir,
            env: HashMap::new(),
        }
    }

    /// Replace the environment consulted for token and URL overrides
    pub fn with_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Create a ConfigManager using platform-specific default directories
    /// and the process environment.
    ///
    /// - macOS: ~/Library/Application Support/repokit/
    /// - Linux: $XDG_CONFIG_HOME/repokit/
    /// - Windows: %APPDATA%\repokit\
    pub fn with_defaults() -> std::result::Result<Self, ConfigError> {
        let env: HashMap<String, String> = std::env::vars().collect();

        // Check for override environment variable (useful for CLI testing)
        let config_dir = match env.get(CONFIG_HOME_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => ProjectDirs::from("", "", "repokit")
                .ok_or(ConfigError::NoConfigDirectory)?
                .config_dir()
                .to_path_buf(),
        };

        Ok(Self::new(config_dir).with_env(env))
    }

    /// Get the path to the config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load the configuration from disk.
    ///
    /// If the config file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<AppConfig> {
        let config_path = self.config_path();

        if !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let contents = fs::read_to_string(&config_path).map_err(ConfigError::Io)?;
        let mut config: AppConfig =
            serde_json::from_str(&contents).map_err(ConfigError::ParseError)?;

        self.migrate(&mut config);

        Ok(config)
    }

    /// Save the configuration to disk atomically.
    ///
    /// Uses a write-to-temp-then-rename strategy to prevent corruption
    /// if the process is interrupted during write.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        fs::create_dir_all(&self.config_dir).map_err(ConfigError::Io)?;

        let config_path = self.config_path();
        let temp_path = config_path.with_extension("json.tmp");

        let contents = serde_json::to_string_pretty(config).map_err(ConfigError::ParseError)?;
        fs::write(&temp_path, contents).map_err(ConfigError::Io)?;
        fs::rename(&temp_path, &config_path).map_err(ConfigError::Io)?;

        tracing::debug!(path = %config_path.display(), "saved config");
        Ok(())
    }

    fn migrate(&self, config: &mut AppConfig) {
        if config.config_version < CURRENT_CONFIG_VERSION {
            tracing::info!(
                from = config.config_version,
                to = CURRENT_CONFIG_VERSION,
                "migrating config"
            );
            config.config_version = CURRENT_CONFIG_VERSION;
        }
    }

    fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Token the environment supplies, if any
    pub fn env_token(&self) -> Option<&str> {
        self.env_var(TOKEN_ENV)
            .or_else(|| self.env_var(GITHUB_TOKEN_ENV))
    }
}

/// API client resolution
impl ConfigManager {
    /// Resolve the settings used to talk to `host`.
    ///
    /// Precedence: environment, then the host's entry in the config file,
    /// then the endpoints the host serves by default.
    pub fn client_settings(&self, host: &str) -> Result<ClientSettings> {
        let config = self.load()?;
        let host = normalize_host(host);
        let host_config = config.host(&host).cloned().unwrap_or_default();

        let mut settings = ClientSettings::for_host(&host)
            .with_timeout(Duration::from_secs(config.settings.timeout_secs));

        if let Some(url) = self.env_var(API_URL_ENV).or(host_config.api_url.as_deref()) {
            settings = settings.with_base_url(url);
        }

        let token = self
            .env_token()
            .map(str::to_string)
            .or(host_config.token);

        Ok(settings.with_token(token))
    }

    /// Build an [`ApiClient`] for `host`
    pub fn api_client(&self, host: &str) -> Result<ApiClient> {
        ApiClient::new(self.client_settings(host)?)
    }
}
