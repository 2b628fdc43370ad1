//! Data models for repokit

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current config version for migrations
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Host assumed when a repository reference has no host component
pub const DEFAULT_HOST: &str = "github.com";

/// A repository reference parsed from `[HOST/]OWNER/REPO` or a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    host: String,
    owner: String,
    name: String,
}

impl RepoRef {
    /// Create a reference on the default host
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::with_host(DEFAULT_HOST, owner, name)
    }

    /// Create a reference on an explicit host
    pub fn with_host(
        host: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            host: normalize_host(&host.into()),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse `OWNER/REPO`, `HOST/OWNER/REPO` or `https://HOST/OWNER/REPO[.git]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use repokit_core::RepoRef;
    ///
    /// let repo = RepoRef::from_full_name("cli/cli").unwrap();
    /// assert_eq!(repo.owner(), "cli");
    /// assert_eq!(repo.host(), "github.com");
    ///
    /// let repo = RepoRef::from_full_name("ghe.example.com/team/app").unwrap();
    /// assert_eq!(repo.host(), "ghe.example.com");
    ///
    /// assert!(RepoRef::from_full_name("just-a-name").is_err());
    /// ```
    pub fn from_full_name(full_name: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidRepoName(full_name.to_string());

        let (path, from_url) = match full_name
            .strip_prefix("https://")
            .or_else(|| full_name.strip_prefix("http://"))
        {
            Some(rest) => (rest.trim_end_matches('/'), true),
            None => (full_name, false),
        };

        let parts: Vec<&str> = path.split('/').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(invalid());
        }

        match parts.as_slice() {
            [owner, name] if !from_url => Ok(Self::new(*owner, *name)),
            [host, owner, name] => {
                let name = if from_url {
                    name.strip_suffix(".git").unwrap_or(name)
                } else {
                    name
                };
                if name.is_empty() {
                    return Err(invalid());
                }
                Ok(Self::with_host(*host, *owner, name))
            }
            _ => Err(invalid()),
        }
    }

    /// Hostname the repository lives on
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Owner login
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `OWNER/REPO`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.host == DEFAULT_HOST {
            write!(f, "{}/{}", self.owner, self.name)
        } else {
            write!(f, "{}/{}/{}", self.host, self.owner, self.name)
        }
    }
}

/// Lowercase a hostname and fold `www.github.com` onto `github.com`
pub fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) if rest == DEFAULT_HOST => rest.to_string(),
        _ => host,
    }
}

/// Repository identity as returned by the lookup query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryInfo {
    /// Opaque node ID, stable across renames
    pub id: String,
    /// Current repository name
    pub name: String,
    /// Owning account or organization
    pub owner: RepositoryOwner,
}

/// Owner block of [`RepositoryInfo`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepositoryOwner {
    pub login: String,
}

impl RepositoryInfo {
    /// Reference to this repository on the given host
    pub fn repo_ref(&self, host: &str) -> RepoRef {
        RepoRef::with_host(host, self.owner.login.as_str(), self.name.as_str())
    }
}

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Application-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Timeout in seconds applied to every API request
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Per-host settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// API token for the host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// REST base URL, when it differs from the derived one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

/// The main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Config version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,
    /// Application settings
    #[serde(default)]
    pub settings: AppSettings,
    /// Host-specific settings keyed by hostname
    #[serde(default)]
    pub hosts: BTreeMap<String, HostConfig>,
}

fn default_config_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION,
            settings: AppSettings::default(),
            hosts: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Settings for a host, if any are stored
    pub fn host(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(&normalize_host(host))
    }

    /// Settings for a host, created empty when missing
    pub fn host_mut(&mut self, host: &str) -> &mut HostConfig {
        self.hosts.entry(normalize_host(host)).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_owner_repo() {
        let repo = RepoRef::from_full_name("OWNER/REPO").unwrap();
        assert_eq!(repo.host(), "github.com");
        assert_eq!(repo.owner(), "OWNER");
        assert_eq!(repo.name(), "REPO");
        assert_eq!(repo.full_name(), "OWNER/REPO");
        assert_eq!(repo.to_string(), "OWNER/REPO");
    }

    #[test]
    fn test_parse_with_host() {
        let repo = RepoRef::from_full_name("GHE.Example.com/team/app").unwrap();
        assert_eq!(repo.host(), "ghe.example.com");
        assert_eq!(repo.full_name(), "team/app");
        assert_eq!(repo.to_string(), "ghe.example.com/team/app");

        let repo = RepoRef::from_full_name("www.github.com/o/r").unwrap();
        assert_eq!(repo.host(), "github.com");
    }

    #[test]
    fn test_parse_url() {
        let repo = RepoRef::from_full_name("https://github.com/cli/cli.git").unwrap();
        assert_eq!(repo.host(), "github.com");
        assert_eq!(repo.full_name(), "cli/cli");

        let repo = RepoRef::from_full_name("http://ghe.local/o/r/").unwrap();
        assert_eq!(repo.host(), "ghe.local");
        assert_eq!(repo.name(), "r");
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "REPO",
            "/REPO",
            "OWNER/",
            "a/b/c/d",
            "OWNER//REPO",
            "https://github.com/cli",
            "https://github.com/o/.git",
        ] {
            let err = RepoRef::from_full_name(input).unwrap_err();
            assert_eq!(err, ValidationError::InvalidRepoName(input.to_string()));
        }
    }

    #[test]
    fn test_repository_info_deserialize() {
        let info: RepositoryInfo = serde_json::from_str(
            r#"{"id":"THE-ID","name":"REPO","owner":{"login":"OWNER"}}"#,
        )
        .unwrap();
        assert_eq!(info.id, "THE-ID");
        assert_eq!(info.repo_ref("github.com"), RepoRef::new("OWNER", "REPO"));
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.config_version, CURRENT_CONFIG_VERSION);
        assert_eq!(config.settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.hosts.is_empty());
    }

    #[test]
    fn test_host_lookup_is_normalized() {
        let mut config = AppConfig::default();
        config.host_mut("GitHub.com").token = Some("t".to_string());

        assert!(config.host("github.com").is_some());
        assert!(config.host("www.github.com").is_some());
        assert!(config.host("ghe.local").is_none());
    }

    #[test]
    fn test_serde_defaults_from_sparse_json() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
