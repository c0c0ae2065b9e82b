use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const UPLOAD_DIR: &str = "./uploaded_files";
pub const LOG_DIR: &str = "logs";
pub const BIND_ADDR: &str = "127.0.0.1:8000";
pub const DATABASE_POOL_SIZE: u32 = 10;

/// Local frontend dev servers allowed to call the API.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}",
            self.user, self.password, self.host, self.name
        )
    }
}

/// `LOG_DIR`, or the default. Resolved on its own so logging can start before
/// the rest of the configuration is validated.
pub fn log_dir_from_env() -> PathBuf {
    log_dir_from_lookup(|key| env::var(key).ok())
}

fn log_dir_from_lookup<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LOG_DIR))
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub pool_size: u32,
    pub upload_dir: PathBuf,
    pub log_dir: PathBuf,
    pub bind_addr: String,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let database = DatabaseConfig {
            user: required("POSTGRES_USER")?,
            password: required("POSTGRES_PASSWORD")?,
            host: required("POSTGRES_SERVER")?,
            name: required("POSTGRES_DB")?,
        };

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => match value.parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_POOL_SIZE",
                        value,
                    });
                }
            },
            None => DATABASE_POOL_SIZE,
        };

        Ok(Config {
            database,
            pool_size,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(UPLOAD_DIR)),
            log_dir: log_dir_from_lookup(&lookup),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| BIND_ADDR.to_string()),
        })
    }
}
