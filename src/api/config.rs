//! Service configuration.
//!
//! Values are layered: built-in defaults, then an optional `config.toml`
//! (looked up in `.` and then `./config`), then `APP_`-prefixed environment
//! variables such as `APP_SERVER_PORT` or `APP_APP_LOG_LEVEL`.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_PREFIX: &str = "APP_";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound on a single request, in seconds.
    pub request_timeout_secs: u64,
    /// How long shutdown waits for open connections, in seconds.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 5,
            shutdown_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::Invalid {
            key: "server.host".to_string(),
            value: self.host.clone(),
            reason: "not an IP address".to_string(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, or `:memory:`.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: "tutorial.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub environment: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            name: "Production API".to_string(),
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub app: AppConfig,
}

impl Config {
    /// Defaults, then the first config file found, then the process
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match find_config_file(&[Path::new("."), Path::new("config")]) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that parse but cannot work, such as a zero request
    /// timeout that would fail every request.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "server.request_timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from `lookup`, which maps an environment variable
    /// name to its value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(host) = var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("SERVER_PORT") {
            self.server.port = parse_number("APP_SERVER_PORT", &port)?;
        }
        if let Some(secs) = var("SERVER_REQUEST_TIMEOUT_SECS") {
            self.server.request_timeout_secs =
                parse_positive("APP_SERVER_REQUEST_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = var("SERVER_SHUTDOWN_TIMEOUT_SECS") {
            self.server.shutdown_timeout_secs =
                parse_number("APP_SERVER_SHUTDOWN_TIMEOUT_SECS", &secs)?;
        }
        if let Some(path) = var("DATABASE_PATH") {
            self.database.path = path;
        }
        if let Some(name) = var("APP_NAME") {
            self.app.name = name;
        }
        if let Some(env) = var("APP_ENVIRONMENT") {
            self.app.environment = env;
        }
        if let Some(level) = var("APP_LOG_LEVEL") {
            self.app.log_level = level;
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_positive(key: &str, value: &str) -> Result<u64, ConfigError> {
    match parse_number(key, value)? {
        0 => Err(ConfigError::Invalid {
            key: key.to_string(),
            value: value.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        n => Ok(n),
    }
}

pub fn find_config_file(dirs: &[&Path]) -> Option<PathBuf> {
    dirs.iter()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
