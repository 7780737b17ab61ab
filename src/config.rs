//! Application configuration loaded from environment variables.

use std::net::SocketAddr;

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use strum::{Display, EnumString};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Database ===
    /// PostgreSQL host.
    #[serde(default = "default_postgres_host")]
    pub postgres_host: String,

    /// PostgreSQL port.
    #[serde(default = "default_postgres_port")]
    pub postgres_port: u16,

    /// Database name.
    #[serde(default = "default_postgres_db")]
    pub postgres_db: String,

    /// Database user.
    #[serde(default = "default_postgres_user")]
    pub postgres_user: String,

    /// Database password.
    #[serde(default = "default_postgres_password")]
    pub postgres_password: String,

    // === Server Configuration ===
    /// HTTP listen port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log filter directives (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_postgres_host() -> String {
    "db".to_string()
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_postgres_db() -> String {
    "appdb".to_string()
}

fn default_postgres_user() -> String {
    "appuser".to_string()
}

fn default_postgres_password() -> String {
    "apppassword".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            postgres_host: default_postgres_host(),
            postgres_port: default_postgres_port(),
            postgres_db: default_postgres_db(),
            postgres_user: default_postgres_user(),
            postgres_password: default_postgres_password(),
            port: default_port(),
            rust_log: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from key/value pairs.
    ///
    /// Variables set to an empty string count as unset and take their
    /// default, so `POSTGRES_HOST=` in a compose file still means `db`.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars.into_iter().filter(|(_, value)| !value.is_empty()))
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.postgres_host.is_empty() {
            return Err("POSTGRES_HOST must not be empty".to_string());
        }

        if self.postgres_db.is_empty() {
            return Err("POSTGRES_DB must not be empty".to_string());
        }

        if self.postgres_user.is_empty() {
            return Err("POSTGRES_USER must not be empty".to_string());
        }

        if self.postgres_port == 0 {
            return Err("POSTGRES_PORT must be non-zero".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        Ok(())
    }

    /// Connection options for the PostgreSQL pool.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.postgres_host)
            .port(self.postgres_port)
            .database(&self.postgres_db)
            .username(&self.postgres_user)
            .password(&self.postgres_password)
    }

    /// Database URL with the password masked, safe to log.
    pub fn redacted_database_url(&self) -> String {
        format!(
            "postgres://{}:***@{}:{}/{}",
            self.postgres_user, self.postgres_host, self.postgres_port, self.postgres_db
        )
    }

    /// Address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
