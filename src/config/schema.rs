//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};

/// Longest session lifetime accepted, one year
pub const MAX_TTL_HOURS: u64 = 24 * 365;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub blogs: BlogsConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// "production" turns on secure-only behaviour elsewhere
    #[serde(default = "default_app_env")]
    pub app_env: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_app_env() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_env: default_app_env(),
        }
    }
}

impl Config {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        self.session.validate()
    }
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }
}

/// Session cookie and cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Lifetime of both the cache entry and the cookie
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    #[serde(default)]
    pub secure_cookie: bool,

    /// How often expired cache entries are swept
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

fn default_cookie_name() -> String {
    "session_id".to_string()
}

fn default_ttl_hours() -> u64 {
    6
}

fn default_purge_interval_secs() -> u64 {
    300
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            ttl_hours: default_ttl_hours(),
            secure_cookie: false,
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

impl SessionConfig {
    /// Session lifetime, saturating for values `validate` would reject
    pub fn ttl(&self) -> Duration {
        self.ttl_hours
            .checked_mul(60 * 60)
            .map(Duration::from_secs)
            .unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ttl_hours == 0 || self.ttl_hours > MAX_TTL_HOURS {
            return Err(Error::Config(format!(
                "session.ttl_hours must be between 1 and {}, got {}",
                MAX_TTL_HOURS, self.ttl_hours
            )));
        }
        if self.cookie_name.is_empty() {
            return Err(Error::Config("session.cookie_name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Credential settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

/// Blog listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogsConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    10
}

impl Default for BlogsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}
