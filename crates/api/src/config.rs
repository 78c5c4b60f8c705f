use axum::http::HeaderValue;

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    /// `*`: any origin, without credentials.
    Any,
    /// An explicit allow-list.
    List(Vec<HeaderValue>),
}

/// Where records are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreBackend {
    /// PostgreSQL at the given connection URL.
    Postgres { url: String, max_connections: u32 },
    /// Randomly generated records held in memory (`DATABASE_URL=memory`).
    Memory { seed_count: usize },
}

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value '{value}': {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields except the database URL have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from the comma-separated `CORS_ORIGINS`.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Record store selection.
    pub store: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `*`                        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DATABASE_URL`         | required (`memory` allowed)|
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `SEED_COUNT`           | `120` (memory store only)  |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = parse_env("PORT", "8000")?;
        let cors_origins = parse_cors_origins(&env_or("CORS_ORIGINS", "*"))?;
        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30")?;

        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing {
            name: "DATABASE_URL",
        })?;
        let store = if database_url == "memory" {
            StoreBackend::Memory {
                seed_count: parse_env("SEED_COUNT", "120")?,
            }
        } else {
            StoreBackend::Postgres {
                url: database_url,
                max_connections: parse_env("DB_MAX_CONNECTIONS", "20")?,
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
        })
    }
}

/// Parse a comma-separated origin list. A lone `*` allows any origin.
pub fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.is_empty() || entries.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    entries
        .into_iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(name: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = env_or(name, default);
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
        value,
    })
}
