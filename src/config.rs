use std::str::FromStr;

use anyhow::Context;
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub ssl_mode: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let ssl_mode = PgSslMode::from_str(&self.ssl_mode)
            .with_context(|| format!("invalid DB_SSLMODE '{}'", self.ssl_mode))?;
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

/// Argon2 work factor. `None` keeps the library default for that parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HashConfig {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub hash: HashConfig,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Reads the process environment. Outside a managed environment
    /// (`APP_ENV` unset) the variables come from `./.env` first.
    pub fn from_env() -> anyhow::Result<Self> {
        if std::env::var_os("APP_ENV").is_none() {
            dotenvy::from_filename(".env").context("load .env")?;
        }

        let database = DatabaseConfig {
            host: required("DB_HOST")?,
            port: required("DB_PORT")?
                .parse()
                .context("DB_PORT must be a port number")?,
            user: required("DB_USER")?,
            password: std::env::var("DB_PASS").unwrap_or_default(),
            ssl_mode: std::env::var("DB_SSLMODE").unwrap_or_else(|_| "prefer".into()),
            name: required("DB_NAME")?,
        };
        let hash = HashConfig {
            memory_kib: optional_u32("HASH_MEMORY_KIB")?,
            iterations: optional_u32("HASH_ITERATIONS")?,
            parallelism: optional_u32("HASH_PARALLELISM")?,
        };
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse().context("APP_PORT must be a port number")?,
            Err(_) => 9091,
        };

        Ok(Self {
            database,
            hash,
            host,
            port,
        })
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("missing environment variable {key}"))
}

fn optional_u32(key: &str) -> anyhow::Result<Option<u32>> {
    std::env::var(key)
        .ok()
        .map(|v| v.parse::<u32>().with_context(|| format!("{key} must be an integer")))
        .transpose()
}
