use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("TAGTREND_ENV", "development"))?;

    let log_level = or_default("TAGTREND_LOG_LEVEL", "info");
    if log_level.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "TAGTREND_LOG_LEVEL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let config_path = PathBuf::from(or_default(
        "TAGTREND_CONFIG_PATH",
        "./config/tagtrend.yaml",
    ));
    let data_dir = PathBuf::from(or_default("TAGTREND_DATA_DIR", "./data"));

    Ok(AppConfig {
        env,
        log_level,
        config_path,
        data_dir,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TAGTREND_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(
            parse_environment("development").unwrap(),
            Environment::Development
        );
        assert_eq!(parse_environment("test").unwrap(), Environment::Test);
        assert_eq!(
            parse_environment("production").unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn parse_environment_unknown_fails() {
        let err = parse_environment("staging").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TAGTREND_ENV"));
    }

    #[test]
    fn build_app_config_uses_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.config_path, PathBuf::from("./config/tagtrend.yaml"));
        assert_eq!(cfg.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn build_app_config_applies_overrides() {
        let mut map = HashMap::new();
        map.insert("TAGTREND_ENV", "production");
        map.insert("TAGTREND_LOG_LEVEL", "debug");
        map.insert("TAGTREND_CONFIG_PATH", "/etc/tagtrend.yaml");
        map.insert("TAGTREND_DATA_DIR", "/var/lib/tagtrend");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.config_path, PathBuf::from("/etc/tagtrend.yaml"));
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/tagtrend"));
    }

    #[test]
    fn build_app_config_rejects_blank_log_level() {
        let mut map = HashMap::new();
        map.insert("TAGTREND_LOG_LEVEL", "  ");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGTREND_LOG_LEVEL"),
            "expected InvalidEnvVar(TAGTREND_LOG_LEVEL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_unknown_env() {
        let mut map = HashMap::new();
        map.insert("TAGTREND_ENV", "qa");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TAGTREND_ENV"),
            "expected InvalidEnvVar(TAGTREND_ENV), got: {result:?}"
        );
    }
}
