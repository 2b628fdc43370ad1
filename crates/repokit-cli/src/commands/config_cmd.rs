//! Config command implementation

use anyhow::Result;
use repokit_core::{
    validate_api_url, validate_not_empty, ConfigManager, ValidationError, DEFAULT_HOST,
};

use crate::output::OutputContext;
use crate::ExitCode;

const VALID_KEYS: &str = "timeout_secs, token, api_url";

pub fn show(config: &ConfigManager, ctx: &OutputContext) -> Result<ExitCode> {
    let app_config = config.load()?;

    ctx.println("Configuration:");
    ctx.println(&format!("  Config file: {}", config.config_path().display()));
    ctx.println("");
    ctx.println("Settings:");
    ctx.println(&format!("  timeout_secs: {}", app_config.settings.timeout_secs));
    ctx.println("");

    if app_config.hosts.is_empty() {
        ctx.println("Hosts: none configured");
    } else {
        ctx.println("Hosts:");
        for (host, host_config) in &app_config.hosts {
            ctx.println(&format!("  {}", host));
            ctx.println(&format!(
                "    api_url: {}",
                host_config.api_url.as_deref().unwrap_or("default")
            ));
            ctx.println(&format!(
                "    token: {}",
                if host_config.token.is_some() { "set" } else { "not set" }
            ));
        }
    }

    if config.env_token().is_some() {
        ctx.println("");
        ctx.println("A token from the environment overrides configured tokens.");
    }

    Ok(ExitCode::Success)
}

pub fn set(
    config: &ConfigManager,
    key: &str,
    value: &str,
    host: Option<&str>,
    ctx: &OutputContext,
) -> Result<ExitCode> {
    let mut app_config = config.load()?;
    let host = host.unwrap_or(DEFAULT_HOST);

    let shown_value = match key {
        "timeout_secs" => {
            let timeout: u64 = value
                .parse()
                .map_err(|_| invalid(key, "must be a positive integer"))?;
            if timeout == 0 {
                return Err(invalid(key, "must be greater than 0").into());
            }
            app_config.settings.timeout_secs = timeout;
            value.to_string()
        }
        "token" => {
            validate_not_empty(value)?;
            app_config.host_mut(host).token = Some(value.to_string());
            mask_token(value)
        }
        "api_url" => {
            validate_api_url(value)?;
            app_config.host_mut(host).api_url = Some(value.trim_end_matches('/').to_string());
            value.to_string()
        }
        _ => {
            return Err(anyhow::anyhow!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS
            ));
        }
    };

    config.save(&app_config)?;

    ctx.success(&format!("Set {} = {}", key, shown_value));
    if key != "timeout_secs" {
        ctx.info(&format!("host: {}", host));
    }

    Ok(ExitCode::Success)
}

fn invalid(key: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// Keep only the last four characters of a token visible
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
