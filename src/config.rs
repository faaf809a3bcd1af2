use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::api::constants::DEFAULT_TOKEN_TTL_SECS;
use crate::auth::Credentials;

pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

/// Upper bound for `settings.token_ttl_secs`, one day
pub const MAX_TOKEN_TTL_SECS: u64 = 86_400;

/// On-disk secrets file with upper-case top-level keys
#[derive(Deserialize)]
struct SecretsFile {
    #[serde(rename = "BASE_URL")]
    base_url: String,
    #[serde(rename = "USERNAME")]
    username: String,
    #[serde(rename = "PASSWORD")]
    password: String,
    #[serde(default)]
    settings: Settings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub settings: Settings,
}

impl Config {
    /// Load from the secrets file, or from the environment when the file is absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "Secrets file {:?} not found, falling back to environment variables",
                path
            );
            let config = Self {
                credentials: Credentials::from_env()?,
                settings: Settings::default(),
            };
            return Ok(config);
        }

        debug!("Loading secrets from: {:?}", path);
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read secrets file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse secrets file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let secrets: SecretsFile = toml::from_str(content)?;

        if secrets.settings.token_ttl_secs == 0 {
            anyhow::bail!("settings.token_ttl_secs must be greater than zero");
        }
        if secrets.settings.token_ttl_secs > MAX_TOKEN_TTL_SECS {
            anyhow::bail!(
                "settings.token_ttl_secs must be at most {}, got {}",
                MAX_TOKEN_TTL_SECS,
                secrets.settings.token_ttl_secs
            );
        }

        let credentials = Credentials::new(secrets.base_url, secrets.username, secrets.password)?;
        Ok(Self {
            credentials,
            settings: secrets.settings,
        })
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.settings.token_ttl_secs)
    }
}
