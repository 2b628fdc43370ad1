//! repokit core library
//!
//! This crate provides the core functionality for repokit, including
//! configuration management, repository models, the blocking API client
//! and input validation.
//!
//! # Example
//!
//! ```no_run
//! use repokit_core::{ConfigManager, RepoRef};
//!
//! // Resolve settings from the config file and environment
//! let config = ConfigManager::with_defaults().unwrap();
//!
//! // Look up a repository, then rename it
//! let repo = RepoRef::from_full_name("OWNER/REPO").unwrap();
//! let client = config.api_client(repo.host()).unwrap();
//! let info = client.repository_info(&repo).unwrap();
//! client.rename_repository(&info.repo_ref(repo.host()), "NEW_REPO").unwrap();
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod validation;

// Re-export commonly used types
pub use api::{ApiClient, ClientSettings};
pub use config::ConfigManager;
pub use error::{ConfigError, RepoKitError, Result, ValidationError};
pub use models::{
    AppConfig, AppSettings, HostConfig, RepoRef, RepositoryInfo, RepositoryOwner, DEFAULT_HOST,
};
pub use validation::{validate_api_url, validate_new_repo_name, validate_not_empty};
