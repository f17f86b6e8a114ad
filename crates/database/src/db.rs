use log::info;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;
use tokio::sync::OnceCell;

/// Problems reading the connection settings or opening the pool
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to connect to the database: {0}")]
    Connect(#[from] DbErr),
}

/// Connection settings, normally read from the environment (or a `.env` file)
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub sqlx_logging: bool,
}

impl DbConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(Self::DEFAULT_CONNECT_TIMEOUT_SECS),
            sqlx_logging: false,
        }
    }

    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS`,
    /// `DATABASE_CONNECT_TIMEOUT_SECS` and `DATABASE_SQL_LOGGING`
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            url,
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            connect_timeout: Duration::from_secs(env_or(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                Self::DEFAULT_CONNECT_TIMEOUT_SECS,
            )?),
            sqlx_logging: env_or("DATABASE_SQL_LOGGING", false)?,
        })
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.clone());
        options
            .max_connections(self.max_connections)
            .connect_timeout(self.connect_timeout)
            .sqlx_logging(self.sqlx_logging);
        options
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(default),
    }
}

/// Creates a database connection pool
pub async fn create_connection(config: &DbConfig) -> Result<DatabaseConnection, DbErr> {
    Database::connect(config.connect_options()).await
}

static CONNECTION: OnceCell<DatabaseConnection> = OnceCell::const_new();

/// Process-wide pool, established on first use and reused afterwards
pub async fn shared_connection() -> Result<&'static DatabaseConnection, ConfigError> {
    CONNECTION
        .get_or_try_init(|| async {
            let config = DbConfig::from_env()?;
            info!(
                "Opening database pool with up to {} connections",
                config.max_connections
            );
            Ok(create_connection(&config).await?)
        })
        .await
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DbConfig::new("postgres://localhost/curriculum");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout, Duration::from_secs(8));
        assert!(!config.sqlx_logging);

        let options = config.connect_options();
        assert_eq!(options.get_url(), "postgres://localhost/curriculum");
        assert_eq!(options.get_max_connections(), Some(10));
    }
}
