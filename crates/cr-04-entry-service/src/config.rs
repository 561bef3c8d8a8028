//! # Engine Configuration
//!
//! Key source, deployment environment and request limits.
//!
//! | Variable | Default | Notes |
//! |----------|---------|-------|
//! | `CR_ENVIRONMENT` | `development` | `production`, `staging` or `development` |
//! | `CR_ENCRYPTION_KEY` | - | 64 hex chars; mandatory in production |
//! | `CR_MASTER_PASSWORD` | `change-me-in-production` | non-production fallback |
//! | `CR_ENCRYPTION_SALT` | `fixed-salt-change-me` | non-production fallback |
//! | `CR_MAX_BULK_ENTRIES` | `100` | |
//! | `CR_MAX_PAGE_SIZE` | `100` | |

use shared_crypto::KeySource;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fallback master password for non-production key derivation.
pub const DEFAULT_MASTER_PASSWORD: &str = "change-me-in-production";

/// Fallback salt for non-production key derivation.
pub const DEFAULT_ENCRYPTION_SALT: &str = "fixed-salt-change-me";

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Live clinical data.
    Production,
    /// Pre-production.
    Staging,
    /// Local development and tests.
    #[default]
    Development,
}

impl Environment {
    /// Lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Development => "development",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" | "local" => Ok(Environment::Development),
            other => Err(ConfigError::Invalid {
                variable: "CR_ENVIRONMENT",
                reason: format!("unknown environment '{}'", other),
            }),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable has an unusable value.
    #[error("invalid {variable}: {reason}")]
    Invalid {
        /// Variable name.
        variable: &'static str,
        /// What is wrong.
        reason: String,
    },

    /// Production requires an explicit key.
    #[error("CR_ENCRYPTION_KEY must be set in production")]
    MissingProductionKey,
}

/// Entry engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Where the codec key comes from.
    pub key_source: KeySource,
    /// Upper bound for one bulk create.
    pub max_bulk_entries: usize,
    /// Upper bound for one listing page.
    pub max_page_size: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            key_source: KeySource::Password {
                password: DEFAULT_MASTER_PASSWORD.to_string(),
                salt: DEFAULT_ENCRYPTION_SALT.to_string(),
            },
            max_bulk_entries: 100,
            max_page_size: 100,
        }
    }
}

impl EngineConfig {
    /// Development configuration with a fixed explicit key, so tests skip
    /// the slow derivation.
    pub fn for_testing() -> Self {
        Self::default().with_key_source(KeySource::Secret("42".repeat(32)))
    }

    /// Set the environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the key source.
    pub fn with_key_source(mut self, key_source: KeySource) -> Self {
        self.key_source = key_source;
        self
    }

    /// Set the bulk limit.
    pub fn with_max_bulk_entries(mut self, max: usize) -> Self {
        self.max_bulk_entries = max;
        self
    }

    /// Set the page size limit.
    pub fn with_max_page_size(mut self, max: u32) -> Self {
        self.max_page_size = max;
        self
    }

    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("CR_ENVIRONMENT") {
            Some(raw) => raw.parse()?,
            None => Environment::Development,
        };

        let key_source = match lookup("CR_ENCRYPTION_KEY").filter(|k| !k.trim().is_empty()) {
            Some(key) => {
                let key = key.trim().to_string();
                if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(ConfigError::Invalid {
                        variable: "CR_ENCRYPTION_KEY",
                        reason: "expected 64 hex characters".into(),
                    });
                }
                KeySource::Secret(key)
            }
            None => KeySource::Password {
                password: lookup("CR_MASTER_PASSWORD")
                    .unwrap_or_else(|| DEFAULT_MASTER_PASSWORD.to_string()),
                salt: lookup("CR_ENCRYPTION_SALT")
                    .unwrap_or_else(|| DEFAULT_ENCRYPTION_SALT.to_string()),
            },
        };

        let defaults = Self::default();
        let config = Self {
            environment,
            key_source,
            max_bulk_entries: parse_limit(
                &lookup,
                "CR_MAX_BULK_ENTRIES",
                defaults.max_bulk_entries,
            )?,
            max_page_size: parse_limit(&lookup, "CR_MAX_PAGE_SIZE", defaults.max_page_size)?,
        };
        config.validate_for_production()?;
        Ok(config)
    }

    /// Reject a password-derived key in production.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.environment == Environment::Production && self.key_source.is_password_derived() {
            return Err(ConfigError::MissingProductionKey);
        }
        Ok(())
    }
}

fn parse_limit<F, T>(lookup: &F, variable: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialOrd + From<u8>,
{
    let Some(raw) = lookup(variable) else {
        return Ok(default);
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value >= T::from(1) => Ok(value),
        _ => Err(ConfigError::Invalid {
            variable,
            reason: format!("expected a positive integer, got '{}'", raw),
        }),
    }
}
