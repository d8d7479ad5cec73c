//! Environment-driven configuration.
//!
//! | Variable        | Default   | Meaning                                    |
//! |-----------------|-----------|--------------------------------------------|
//! | `DATABASE_URL`  | required  | connection string of the document store    |
//! | `DATABASE_NAME` | `store`   | database holding the `products` collection |
//! | `LOG_LEVEL`     | `info`    | fallback filter when `RUST_LOG` is unset   |
//! | `LOG_FORMAT`    | `pretty`  | `json` for structured output               |

use std::env;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),
}

/// Configuration that can be loaded from environment variables.
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, SettingsError>;
}

/// Reads `key`, falling back to `default` when unset.
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads `key` or fails with [`SettingsError::MissingEnvVar`].
pub fn env_required(key: &str) -> Result<String, SettingsError> {
    env::var(key).map_err(|_| SettingsError::MissingEnvVar(key.to_string()))
}

/// Where the document store lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub name: String,
}

impl FromEnv for DatabaseSettings {
    fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            url: env_required("DATABASE_URL")?,
            name: env_or_default("DATABASE_NAME", "store"),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}

impl FromEnv for LogSettings {
    fn from_env() -> Result<Self, SettingsError> {
        let format = if env_or_default("LOG_FORMAT", "pretty").eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };

        Ok(Self {
            level: env_or_default("LOG_LEVEL", "info"),
            format,
        })
    }
}

/// All process settings, loaded once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub log: LogSettings,
}

impl FromEnv for Settings {
    fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            database: DatabaseSettings::from_env()?,
            log: LogSettings::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_settings_from_env() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://localhost:27017")),
                ("DATABASE_NAME", None),
            ],
            || {
                let settings = DatabaseSettings::from_env().unwrap();
                assert_eq!(settings.url, "mongodb://localhost:27017");
                assert_eq!(settings.name, "store");
            },
        );
    }

    #[test]
    fn database_url_is_required() {
        temp_env::with_var_unset("DATABASE_URL", || {
            let err = DatabaseSettings::from_env().unwrap_err();
            assert!(err.to_string().contains("DATABASE_URL"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn log_settings_default_to_pretty_info() {
        temp_env::with_vars_unset(["LOG_LEVEL", "LOG_FORMAT"], || {
            assert_eq!(LogSettings::from_env().unwrap(), LogSettings::default());
        });
    }

    #[test]
    fn log_format_json_is_case_insensitive() {
        temp_env::with_vars(
            [("LOG_FORMAT", Some("JSON")), ("LOG_LEVEL", Some("debug"))],
            || {
                let settings = LogSettings::from_env().unwrap();
                assert_eq!(settings.format, LogFormat::Json);
                assert_eq!(settings.level, "debug");
            },
        );
    }

    #[test]
    fn settings_combine_sections() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", Some("mongodb://db:27017")),
                ("DATABASE_NAME", Some("catalog")),
                ("LOG_FORMAT", None),
                ("LOG_LEVEL", None),
            ],
            || {
                let settings = Settings::from_env().unwrap();
                assert_eq!(settings.database.name, "catalog");
                assert_eq!(settings.log.format, LogFormat::Pretty);
            },
        );
    }
}
