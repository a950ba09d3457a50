//! Deployment environment and logging settings

use serde::{Deserialize, Serialize};
use std::env;

/// Deployment environment, selects the config file and logging defaults
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }

    /// Read `EDASH_ENV`, then `ENVIRONMENT`; unknown or missing values mean development
    pub fn from_env() -> Self {
        ["EDASH_ENV", "ENVIRONMENT"]
            .iter()
            .find_map(|name| env::var(name).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Config file base name; the extension picks the format (`.toml`, `.yaml`, `.json`)
    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Log line layout
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Include the event target in log lines
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: default_log_format(),
            with_target: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults for `env`: verbose pretty output in development, compact info lines in production
    pub fn for_environment(env: Environment) -> Self {
        let (level, format, with_target) = match env {
            Environment::Development => ("debug", LogFormat::Pretty, true),
            Environment::Staging => ("info", LogFormat::Full, true),
            Environment::Production => ("info", LogFormat::Compact, false),
        };
        Self {
            level: level.to_string(),
            format,
            with_target,
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Full,
    Pretty,
    Compact,
}

fn default_log_format() -> LogFormat {
    LogFormat::Full
}
