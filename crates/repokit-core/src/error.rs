//! Error types for repokit

use thiserror::Error;

/// Main error type for repokit-core operations
#[derive(Error, Debug)]
pub enum RepoKitError {
    /// Invalid user input, reported before any network activity
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {message} ({url})")]
    Api {
        status: u16,
        message: String,
        url: String,
    },

    /// The GraphQL endpoint reported errors in its response envelope
    #[error("GraphQL: {0}")]
    GraphQl(String),

    /// The lookup query returned no repository
    #[error("Could not resolve to a Repository with the name '{0}'")]
    RepositoryNotFound(String),

    /// Transport-level failure (connection, TLS, timeout, decoding)
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl RepoKitError {
    /// HTTP status carried by the error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            RepoKitError::Api { status, .. } => Some(*status),
            RepoKitError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error means the repository does not exist (or is not visible)
    pub fn is_not_found(&self) -> bool {
        match self {
            RepoKitError::RepositoryNotFound(_) => true,
            RepoKitError::GraphQl(msg) => msg.contains("Could not resolve"),
            _ => self.status() == Some(404),
        }
    }

    /// Whether the error is an authentication or authorization failure
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

/// Validation errors for command-line input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The repository positional argument is missing
    #[error("cannot rename: repository argument required")]
    MissingRepositoryArgument,

    /// More positional arguments than the command accepts
    #[error("accepts at most {max} arg(s), received {received}")]
    TooManyArguments { max: usize, received: usize },

    /// Repository reference is not `[HOST/]OWNER/REPO`
    #[error("expected the \"[HOST/]OWNER/REPO\" format, got \"{0}\"")]
    InvalidRepoName(String),

    /// New repository name is not acceptable
    #[error("invalid new repository name \"{name}\": {reason}")]
    InvalidNewName { name: String, reason: String },

    /// Empty input where non-empty is required
    #[error("Input cannot be empty")]
    EmptyInput,

    /// A config value failed to parse or is out of range
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDirectory,

    /// Failed to parse config file
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    /// IO error during config operations
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for repokit-core operations
pub type Result<T> = std::result::Result<T, RepoKitError>;
