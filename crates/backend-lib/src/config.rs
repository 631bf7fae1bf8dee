// ============================
// travelog-backend/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::PasswordRequirements;

/// Prefix for environment overrides, e.g. `TRAVELOG_BIND_ADDR`
pub const ENV_PREFIX: &str = "TRAVELOG_";

/// Variable name the secret was historically read from
pub const LEGACY_SECRET_VAR: &str = "ACCESS_TOKEN_SECRET";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Which store implementation backs the flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON documents under `data_dir`
    File,
    /// Process-local maps, lost on restart
    Memory,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Data directory path
    pub data_dir: PathBuf,
    /// Store implementation
    pub storage: StorageBackend,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// HMAC secret for access tokens. Empty means an ephemeral secret is generated at startup.
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    /// Access token validity in seconds
    pub token_ttl_secs: u64,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            data_dir: PathBuf::from("data"),
            storage: StorageBackend::File,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            jwt_secret: String::new(),
            token_ttl_secs: 60 * 60, // 1 hour
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Settings {
    /// Layered sources: defaults, `config/default.toml`, `config.toml`, an optional
    /// explicit file, the legacy secret variable, then `TRAVELOG_*` variables.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config.toml"));

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment
            .merge(
                Env::raw()
                    .only(&[LEGACY_SECRET_VAR])
                    .map(|_| "jwt_secret".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load and validate settings
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let settings: Settings = Self::figment(config_file).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            bail!("Invalid log level '{}'", self.log_level);
        }

        if self.token_ttl_secs == 0 {
            bail!("token_ttl_secs must be greater than zero");
        }

        let req = &self.password_requirements;
        if req.min_length == 0 || req.min_length > req.max_length {
            bail!(
                "Password length bounds are inconsistent: min {} max {}",
                req.min_length,
                req.max_length
            );
        }

        Ok(())
    }

    /// Access token validity window
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }
}
