//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Postgres connection settings. Present only when `DATABASE_URL` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// `None` selects the in-memory product store.
    pub database: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Invalid values fall back
    /// to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = parse_or_default(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parse_or_default(
                    &lookup,
                    "DATABASE_MAX_CONNECTIONS",
                    Some(DEFAULT_MAX_CONNECTIONS),
                )
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                acquire_timeout: Duration::from_secs(
                    parse_or_default(
                        &lookup,
                        "DATABASE_ACQUIRE_TIMEOUT_SECS",
                        Some(DEFAULT_ACQUIRE_TIMEOUT_SECS),
                    )
                    .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
                ),
            });

        Self {
            bind_addr,
            database,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or_default<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Option<T>,
) -> Option<T> {
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(key, value = %raw, "invalid configuration value; falling back to default");
                default
            }
        },
    }
}
