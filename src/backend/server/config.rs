/**
 * Server Configuration
 *
 * This module handles loading of server configuration and opening the
 * SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Later sources override earlier ones:
 * 1. Built-in defaults
 * 2. TOML file at `$DEVCONNECT_CONFIG` (default `config/default.toml`), if present
 * 3. Environment variables (a `.env` file is loaded first when present):
 *    `DATABASE_URL`, `JWT_SECRET`, `TOKEN_TTL_SECS`, `BCRYPT_COST`,
 *    `DB_MAX_CONNECTIONS`, `SERVER_HOST`, `SERVER_PORT`
 */

use std::{path::Path, str::FromStr, time::Duration};

use serde::Deserialize;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use thiserror::Error;

/// Default config file location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Signing secret used when none is configured
pub const DEV_JWT_SECRET: &str = "change-me-in-production";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// sqlx SQLite URL, e.g. `sqlite:devconnect.db?mode=rwc` or `sqlite::memory:`
    pub database_url: String,
    pub db_max_connections: u32,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub token_ttl_secs: u64,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:devconnect.db?mode=rwc".to_string(),
            db_max_connections: 5,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl_secs: 360_000,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            host: "0.0.0.0".to_string(),
            port: 9008,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let path = std::env::var("DEVCONNECT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file_if_exists(Path::new(&path))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;

        if config.jwt_secret == DEV_JWT_SECRET {
            tracing::warn!("JWT_SECRET not set. Using the development signing secret.");
        }

        Ok(config)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Defaults when the file does not exist
    pub fn from_file_if_exists(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Apply overrides from a key lookup (the environment, in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            self.host = host;
        }
        override_parsed(&lookup, "TOKEN_TTL_SECS", &mut self.token_ttl_secs)?;
        override_parsed(&lookup, "BCRYPT_COST", &mut self.bcrypt_cost)?;
        override_parsed(&lookup, "DB_MAX_CONNECTIONS", &mut self.db_max_connections)?;
        override_parsed(&lookup, "SERVER_PORT", &mut self.port)?;
        Ok(())
    }

    /// `host:port` for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn override_parsed<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw })?;
    }
    Ok(())
}

/// Open the SQLite pool and run migrations
///
/// An in-memory database lives only as long as its connection, so for
/// `:memory:` URLs the pool is pinned to a single connection that is never
/// recycled.
pub async fn connect_database(database_url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(5))
    };

    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
