use axum::http::HeaderValue;
use std::env;
use thiserror::Error;

const DEFAULT_PORT: u16 = 4100;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3100";

/// Runtime configuration, read from the environment once at startup.
/// There is no hot reload; changing a value means restarting the process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret the token issuer signs with. Verification only.
    pub jwt_secret: String,
    /// Postgres connection string for the movie store.
    pub database_url: String,
    /// TCP port to listen on.
    pub port: u16,
    /// The single origin allowed to make cross-origin requests.
    pub cors_origin: HeaderValue,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("PORT must be a valid TCP port, got {0:?}")]
    InvalidPort(String),

    #[error("CORS_ORIGIN is not a valid origin: {0:?}")]
    InvalidCorsOrigin(String),
}

impl AppConfig {
    /// Load configuration from the environment. Fails when a required
    /// variable is missing or malformed so the process never starts
    /// half-configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = require("JWT_SECRET")?;
        let database_url = require("DATABASE_URL")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let raw_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = raw_origin
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidCorsOrigin(raw_origin))?;

        Ok(Self { jwt_secret, database_url, port, cors_origin })
    }
}

/// Read a required variable, treating an empty value as missing.
fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
