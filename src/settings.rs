//! Layered runtime configuration.
//!
//! Settings are read from an optional `config/default` file, an optional
//! `config/local` file and `GECKO`-prefixed environment variables (nested
//! keys separated by `__`), with the defaults below filling any gaps.

use crate::team::domain::SuccessionPolicy;
use chrono::TimeDelta;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Default activation token lifetime: three days.
const DEFAULT_TOKEN_TTL_SECS: i64 = 259_200;

/// Top-level settings for the Gecko core.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Relational store connection settings.
    pub database: DatabaseSettings,
    /// Team membership policy settings.
    pub teams: TeamSettings,
    /// Account activation settings.
    pub activation: ActivationSettings,
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_pool_size: u32,
}

/// Team policy settings.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TeamSettings {
    /// How a successor is chosen when the admin leaves without naming one.
    pub succession: SuccessionPolicy,
}

/// Account activation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivationSettings {
    /// Secret mixed into every activation token digest.
    pub secret: String,
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,
    /// Public host used when building activation links.
    pub site_domain: String,
}

impl ActivationSettings {
    /// Returns the token lifetime as a [`TimeDelta`], saturating at the
    /// largest representable duration.
    #[must_use]
    pub fn token_ttl(&self) -> TimeDelta {
        i64::try_from(self.token_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Settings {
    /// Loads settings from the standard file and environment sources.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or the merged
    /// values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::default().separator("__").prefix("GECKO"));
        Self::from_builder(builder)
    }

    /// Builds settings from caller-supplied sources, applying defaults for
    /// any missing key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or the merged
    /// values fail validation.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Self = builder
            .set_default("database.url", "postgres://localhost:5432/gecko")?
            .set_default("database.max_pool_size", 10_i64)?
            .set_default("teams.succession", "random")?
            .set_default("activation.secret", "change-me-in-production")?
            .set_default("activation.token_ttl_secs", DEFAULT_TOKEN_TTL_SECS)?
            .set_default("activation.site_domain", "localhost:8000")?
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.max_pool_size == 0 {
            return Err(ConfigError::Message(
                "database.max_pool_size must be at least 1".to_owned(),
            ));
        }
        if self.activation.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "activation.secret must not be empty".to_owned(),
            ));
        }
        if self.activation.token_ttl_secs == 0 {
            return Err(ConfigError::Message(
                "activation.token_ttl_secs must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
