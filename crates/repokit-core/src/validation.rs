//! Input validation for repokit
//!
//! Everything here runs before a request is built, so a rejected value
//! never reaches the network.

use crate::error::ValidationError;

/// Maximum length the hosting API accepts for a repository name
pub const MAX_REPO_NAME_LENGTH: usize = 100;

/// Validate the target name of a rename.
///
/// The name must:
/// - Not be empty
/// - Not contain `/` (the owner cannot change through a rename)
/// - Be at most 100 characters long
///
/// No trimming or normalization is applied; the server decides how to treat
/// characters it does not allow.
///
/// # Examples
///
/// ```
/// use repokit_core::validation::validate_new_repo_name;
///
/// assert!(validate_new_repo_name("NEW_REPO").is_ok());
/// assert!(validate_new_repo_name("").is_err());
/// assert!(validate_new_repo_name("OWNER/REPO").is_err());
/// ```
pub fn validate_new_repo_name(name: &str) -> Result<(), ValidationError> {
    let reject = |reason: &str| {
        Err(ValidationError::InvalidNewName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name cannot be empty");
    }

    if name.contains('/') {
        return reject("name must not include an owner prefix");
    }

    if name.chars().count() > MAX_REPO_NAME_LENGTH {
        return reject("name must be at most 100 characters");
    }

    Ok(())
}

/// Validate that a string is not empty.
pub fn validate_not_empty(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(())
}

/// Validate an API base URL supplied through config.
pub fn validate_api_url(url: &str) -> Result<(), ValidationError> {
    validate_not_empty(url)?;

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ValidationError::InvalidValue {
            key: "api_url".to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }

    Ok(())
}
