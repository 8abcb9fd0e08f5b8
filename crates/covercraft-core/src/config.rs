use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let raw_upstreams = require("COVERCRAFT_UPSTREAM_URLS")?;
    let upstream_urls: Vec<String> = raw_upstreams
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if upstream_urls.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "COVERCRAFT_UPSTREAM_URLS".to_string(),
            reason: "expected at least one comma-separated URL".to_string(),
        });
    }

    let bind_addr = parse_addr("COVERCRAFT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("COVERCRAFT_LOG_LEVEL", "info");
    let fetch_timeout_secs = parse_u64("COVERCRAFT_FETCH_TIMEOUT_SECS", "30")?;
    let fetch_user_agent = or_default(
        "COVERCRAFT_FETCH_USER_AGENT",
        "covercraft/0.1 (storefront-gateway)",
    );
    let max_retries = parse_u32("COVERCRAFT_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("COVERCRAFT_RETRY_BACKOFF_BASE_MS", "1000")?;
    let fallback_path = lookup("COVERCRAFT_FALLBACK_PATH").ok().map(PathBuf::from);

    Ok(AppConfig {
        bind_addr,
        log_level,
        upstream_urls,
        fetch_timeout_secs,
        fetch_user_agent,
        max_retries,
        retry_backoff_base_ms,
        fallback_path,
    })
}
