//! Environment-sourced runtime configuration.

use anyhow::anyhow;
use dotenvy::dotenv;
use secrecy::Secret;
use service_core::error::AppError;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub log_level: String,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// HS256 signing key. Deliberately has no default: an unset key fails
    /// startup instead of silently weakening every issued token.
    pub secret: Secret<String>,
    pub issuer: String,
    pub audience: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let host = env_or("SERVER_HOST", "0.0.0.0");
        let port = env_or("SERVER_PORT", "3001")
            .parse()
            .map_err(|e| AppError::ConfigError(anyhow!("Invalid SERVER_PORT: {}", e)))?;

        let url = env::var("DATABASE_URL")
            .map_err(|_| AppError::ConfigError(anyhow!("DATABASE_URL must be set")))?;
        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow!("Invalid DATABASE_MAX_CONNECTIONS: {}", e))
            })?;
        let min_connections = env_or("DATABASE_MIN_CONNECTIONS", "1")
            .parse()
            .map_err(|e| {
                AppError::ConfigError(anyhow!("Invalid DATABASE_MIN_CONNECTIONS: {}", e))
            })?;

        let secret = env::var("JWT_SECRET")
            .map_err(|_| AppError::ConfigError(anyhow!("JWT_SECRET must be set")))?;
        let issuer = env_or("JWT_ISSUER", "InvoiceManagementAPI");
        let audience = env_or("JWT_AUDIENCE", "InvoiceManagementAPI");

        let log_level = env_or("LOG_LEVEL", "info");

        Ok(Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: Secret::new(url),
                max_connections,
                min_connections,
            },
            jwt: JwtConfig {
                secret: Secret::new(secret),
                issuer,
                audience,
            },
            log_level,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
