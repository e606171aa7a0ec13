use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use axum::http::HeaderValue;

use crate::utils::error::{AppError, AppResult};

const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_DB_PATH: &str = "db.json";
const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub db_path: PathBuf,
    pub lock_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests need not touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| {
            tracing::info!("SERVER_ADDR not set, using default {}", DEFAULT_SERVER_ADDR);
            DEFAULT_SERVER_ADDR.to_string()
        });
        let server_addr = server_addr
            .parse::<SocketAddr>()
            .map_err(|_| {
                AppError::InternalError(format!("Failed to parse SERVER_ADDR: {}", server_addr))
            })?;

        let cors_origin = lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = cors_origin
            .parse::<HeaderValue>()
            .map_err(|_| {
                AppError::InternalError(format!("Failed to parse CORS origin: {}", cors_origin))
            })?;

        let db_path = lookup("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let lock_timeout_ms = match lookup("STORE_LOCK_TIMEOUT_MS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::InternalError(format!(
                    "STORE_LOCK_TIMEOUT_MS must be a number of milliseconds, got {}",
                    raw
                ))
            })?,
            None => DEFAULT_LOCK_TIMEOUT_MS,
        };

        Ok(Self {
            server_addr,
            cors_origin,
            db_path,
            lock_timeout: Duration::from_millis(lock_timeout_ms),
        })
    }
}
