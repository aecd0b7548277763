//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_API_BASE_PATH, DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_HOOKUPS_PUBLIC_PATH,
    DEFAULT_HOOKUPS_UPLOAD_DIR, DEFAULT_LOG_FILTER, DEFAULT_MAX_IMAGE_SIZE_BYTES,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub storage: StorageConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Prefix every API route is mounted under
    pub base_path: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Photo storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory uploaded photos are written to
    pub hookups_dir: PathBuf,
    /// URL path the directory is served under
    pub public_path: String,
    pub max_image_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig::from_lookup(&lookup)?,
            storage: StorageConfig::from_lookup(&lookup)?,
        };
        config.check_mounts()?;
        Ok(config)
    }

    /// The photo mount must not share a prefix with the API or health routes
    fn check_mounts(&self) -> Result<(), ConfigError> {
        let public = self.storage.public_path.as_str();
        let base = self.server.base_path.as_str();

        let mut taken = vec![HEALTH_MOUNT];
        if base == "/" {
            taken.push(HOOKUP_MOUNT);
        } else {
            taken.push(base);
        }

        if taken.iter().any(|mount| mounts_overlap(public, mount)) {
            return Err(ConfigError::InvalidValue("HOOKUPS_PUBLIC_PATH".to_string()));
        }
        Ok(())
    }
}

/// Root-level prefixes the router always claims
const HEALTH_MOUNT: &str = "/health";
const HOOKUP_MOUNT: &str = "/hookup";

/// Whether one mount path equals or sits below the other
fn mounts_overlap(a: &str, b: &str) -> bool {
    let below = |inner: &str, outer: &str| {
        inner
            .strip_prefix(outer)
            .is_some_and(|rest| rest.starts_with('/'))
    };
    a == b || below(a, b) || below(b, a)
}

impl ServerConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_path = lookup("API_BASE_PATH").unwrap_or_else(|| DEFAULT_API_BASE_PATH.to_string());
        let base_path = normalize_mount_path("API_BASE_PATH", &base_path)?;

        Ok(Self {
            host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", lookup("SERVER_PORT"), DEFAULT_SERVER_PORT)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            base_path,
        })
    }
}

impl DatabaseConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: lookup("DATABASE_URL").ok_or_else(|| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_DATABASE_MAX_CONNECTIONS,
            )?,
        })
    }
}

impl JwtConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").ok_or_else(|| ConfigError::Missing("JWT_SECRET".to_string()))?;
        if secret.is_empty() {
            return Err(ConfigError::InvalidValue("JWT_SECRET".to_string()));
        }
        Ok(Self { secret })
    }
}

impl StorageConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let public_path = lookup("HOOKUPS_PUBLIC_PATH")
            .unwrap_or_else(|| DEFAULT_HOOKUPS_PUBLIC_PATH.to_string());

        let public_path = normalize_mount_path("HOOKUPS_PUBLIC_PATH", &public_path)?;
        // Serving photos at the root would shadow every other route
        if public_path == "/" {
            return Err(ConfigError::InvalidValue("HOOKUPS_PUBLIC_PATH".to_string()));
        }

        Ok(Self {
            hookups_dir: PathBuf::from(
                lookup("HOOKUPS_UPLOAD_DIR").unwrap_or_else(|| DEFAULT_HOOKUPS_UPLOAD_DIR.to_string()),
            ),
            public_path,
            max_image_bytes: parse_or(
                "MAX_IMAGE_SIZE_BYTES",
                lookup("MAX_IMAGE_SIZE_BYTES"),
                DEFAULT_MAX_IMAGE_SIZE_BYTES,
            )?,
        })
    }
}

/// Parse an optional raw value, falling back to a default when unset
fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Mount paths must start with `/`; a trailing `/` is dropped
fn normalize_mount_path(key: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('/') {
        return Err(ConfigError::InvalidValue(key.to_string()));
    }
    let normalized = trimmed.trim_end_matches('/');
    if normalized.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(normalized.to_string())
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
