use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_APP_ORIGIN: &str = "http://localhost:5173";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("FOLIO_LOG_LEVEL", "info");

    // The dashboard build reads VITE_API_BASE_URL; honour it when the
    // folio-specific override is absent.
    let api_base_url = lookup("FOLIO_API_BASE_URL")
        .or_else(|_| lookup("VITE_API_BASE_URL"))
        .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
    let api_base_url = parse_base_url("FOLIO_API_BASE_URL", &api_base_url)?;
    let app_origin = parse_base_url(
        "FOLIO_APP_ORIGIN",
        &or_default("FOLIO_APP_ORIGIN", DEFAULT_APP_ORIGIN),
    )?;

    let session_cookie = lookup("FOLIO_SESSION_COOKIE")
        .ok()
        .filter(|c| !c.trim().is_empty());

    let poll_interval_secs = parse_u64("FOLIO_POLL_INTERVAL_SECS", "30")?;
    if poll_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "FOLIO_POLL_INTERVAL_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let request_timeout_secs = parse_u64("FOLIO_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("FOLIO_USER_AGENT", "folio/0.1 (dashboard-analytics)");
    let published_posts_limit = parse_u32("FOLIO_PUBLISHED_POSTS_LIMIT", "10")?;
    let cache_dir = PathBuf::from(or_default("FOLIO_CACHE_DIR", "./.folio-cache"));

    Ok(AppConfig {
        log_level,
        api_base_url,
        app_origin,
        session_cookie,
        poll_interval_secs,
        request_timeout_secs,
        user_agent,
        published_posts_limit,
        cache_dir,
    })
}

/// Validates an `http(s)://` base URL and strips any trailing slash so paths
/// can be appended with a single `/`.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
