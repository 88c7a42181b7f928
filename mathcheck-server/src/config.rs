//! Layered configuration of the service.
//!
//! Sources, from lowest to highest priority:
//!
//! 1. Built-in defaults.
//! 2. `mathcheck.toml` in the working directory, or the file given with `--config`.
//! 3. Environment variables with the `MATHCHECK_` prefix. A double underscore separates the
//!    section from the key, so `MATHCHECK_SERVER__PORT` sets `server.port`.
//!
//! Command-line flags are applied on top by the binary.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use mathcheck_parser::parser::ParseLimits;
use serde::{Deserialize, Serialize};
use std::{num::NonZeroUsize, path::Path};
use crate::error::ServerError;

/// The file read when no `--config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "mathcheck.toml";

/// The complete configuration of the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to listen on.
    pub host: String,

    /// The port to listen on.
    pub port: u16,

    /// The number of worker threads serving requests.
    pub workers: usize,

    /// Request bodies larger than this are rejected with status 413.
    pub max_body_bytes: usize,

    /// Origins that browsers may call the service from.
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
            workers: std::thread::available_parallelism().map_or(4, NonZeroUsize::get),
            max_body_bytes: 64 * 1024,
            allowed_origins: vec![
                "http://localhost:3000".to_owned(),
                "https://math-checker-mocha.vercel.app".to_owned(),
            ],
        }
    }
}

/// The `[limits]` section, applied to every expression a request contains.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// The maximum length of one expression or line, in bytes.
    pub max_input_len: usize,

    /// The maximum nesting depth of one expression.
    pub max_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        let limits = ParseLimits::default();
        Self {
            max_input_len: limits.max_input_len,
            max_depth: limits.max_depth,
        }
    }
}

impl From<LimitsConfig> for ParseLimits {
    fn from(limits: LimitsConfig) -> Self {
        Self {
            max_input_len: limits.max_input_len,
            max_depth: limits.max_depth,
        }
    }
}

/// The `[log]` section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// The default `tracing` filter, used when `MATHCHECK_LOG` is not set.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "info".to_owned() }
    }
}

impl Config {
    /// Builds the provider chain. A missing file is not an error.
    pub fn figment(path: Option<&Path>) -> Figment {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            // `MATHCHECK_LOG` is the tracing filter, not the `[log]` section
            .merge(Env::prefixed("MATHCHECK_").ignore(&["log"]).split("__"))
    }

    /// Loads the configuration from every source, and checks it.
    pub fn load(path: Option<&Path>) -> Result<Self, ServerError> {
        if let Some(path) = path.filter(|path| !path.exists()) {
            return Err(ServerError::MissingConfig(path.to_path_buf()));
        }
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the service cannot run with.
    pub fn validate(&self) -> Result<(), ServerError> {
        let invalid = |field: &str, reason: &str| Err(ServerError::InvalidValue {
            field: field.to_owned(),
            reason: reason.to_owned(),
        });

        if self.server.workers == 0 {
            return invalid("server.workers", "at least one worker is required");
        }
        if self.server.max_body_bytes == 0 {
            return invalid("server.max_body_bytes", "must be positive");
        }
        if self.limits.max_input_len == 0 || self.limits.max_depth == 0 {
            return invalid("limits", "limits must be positive");
        }
        Ok(())
    }

    /// Returns the address to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.address(), "127.0.0.1:8000");
        assert_eq!(config.limits, LimitsConfig { max_input_len: 4096, max_depth: 128 });
        assert!(config.server.workers > 0);
        assert!(config.server.allowed_origins.contains(&"http://localhost:3000".to_owned()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_then_environment() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, r#"
                [server]
                port = 9000
                workers = 2

                [log]
                level = "debug"
            "#)?;
            jail.set_env("MATHCHECK_SERVER__PORT", "9100");
            jail.set_env("MATHCHECK_LIMITS__MAX_DEPTH", "16");

            let config = Config::load(None).expect("config loads");
            assert_eq!(config.server.port, 9100);
            assert_eq!(config.server.workers, 2);
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.limits.max_depth, 16);
            assert_eq!(config.log.level, "debug");
            Ok(())
        });
    }

    #[test]
    fn explicit_file_must_exist() {
        Jail::expect_with(|_jail| {
            let err = Config::load(Some(Path::new("missing.toml"))).unwrap_err();
            assert!(matches!(err, ServerError::MissingConfig(_)));
            Ok(())
        });
    }

    #[test]
    fn invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("MATHCHECK_SERVER__WORKERS", "0");
            let err = Config::load(None).unwrap_err();
            assert_eq!(err.to_string(), "invalid configuration value for `server.workers`: at least one worker is required");
            Ok(())
        });
    }
}
