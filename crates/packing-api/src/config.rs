//! # Service Configuration
//!
//! Loaded from a YAML file, then overridden by environment variables. A
//! missing file is not an error: defaults apply and the environment fills
//! in the rest.
//!
//! ## Environment overrides
//!
//! | Variable       | Field                |
//! |----------------|----------------------|
//! | `HOST`         | `server.host`        |
//! | `PORT`         | `server.port`        |
//! | `DATABASE_URL` | `database.url`       |
//! | `DB_HOST`      | `database.host`      |
//! | `DB_PORT`      | `database.port`      |
//! | `DB_USER`      | `database.user`      |
//! | `DB_PASSWORD`  | `database.password`  |
//! | `DB_NAME`      | `database.dbname`    |
//! | `DB_SSLMODE`   | `database.sslmode`   |

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

/// Default config path when `CONFIG_PATH` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration loading failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid YAML for [`AppConfig`].
    #[error("failed to decode config file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A database option could not be interpreted.
    #[error("invalid database configuration: {0}")]
    Database(String),
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub packs: PacksConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Postgres connection settings.
///
/// Either `url` or the discrete fields may be used; `url` wins when both
/// are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub sslmode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: None,
            port: 5432,
            user: None,
            password: None,
            dbname: None,
            sslmode: "prefer".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 5,
        }
    }
}

impl DatabaseConfig {
    /// Whether a database has been configured at all.
    pub fn is_configured(&self) -> bool {
        self.url.is_some() || self.host.is_some()
    }

    /// Pool acquire timeout.
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Build sqlx connect options from either the URL or the discrete fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|e| ConfigError::Database(format!("invalid database url: {e}")));
        }

        let ssl_mode = PgSslMode::from_str(&self.sslmode)
            .map_err(|e| ConfigError::Database(format!("invalid sslmode {:?}: {e}", self.sslmode)))?;

        let mut options = PgConnectOptions::new().port(self.port).ssl_mode(ssl_mode);
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(dbname) = &self.dbname {
            options = options.database(dbname);
        }
        Ok(options)
    }
}

/// Seed catalog for in-memory mode.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PacksConfig {
    pub sizes: Vec<i64>,
}

impl Default for PacksConfig {
    fn default() -> Self {
        Self {
            sizes: vec![250, 500, 1000, 2000, 5000],
        }
    }
}

/// Admission limits. Engine cost is linear in `order + max pack size`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_order: i64,
    pub max_pack_size: i64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_order: 10_000_000,
            max_pack_size: 1_000_000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Tracing subscriber settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load from `path` (if it exists) and apply process environment overrides.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Resolve the path from `CONFIG_PATH`, falling back to [`DEFAULT_CONFIG_PATH`].
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    /// Load with an injectable environment lookup.
    pub fn load_with_env(
        path: impl AsRef<Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_yaml(&contents).map_err(|source| ConfigError::Decode {
                path: path.to_path_buf(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.apply_env(env);
        Ok(config)
    }

    /// Parse YAML. An empty document yields defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(host) = env("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env(&env, "PORT") {
            self.server.port = port;
        }
        if let Some(url) = env("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(host) = env("DB_HOST") {
            self.database.host = Some(host);
        }
        if let Some(port) = parse_env(&env, "DB_PORT") {
            self.database.port = port;
        }
        if let Some(user) = env("DB_USER") {
            self.database.user = Some(user);
        }
        if let Some(password) = env("DB_PASSWORD") {
            self.database.password = Some(password);
        }
        if let Some(dbname) = env("DB_NAME") {
            self.database.dbname = Some(dbname);
        }
        if let Some(sslmode) = env("DB_SSLMODE") {
            self.database.sslmode = sslmode;
        }
    }
}

fn parse_env<T: FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with_env(dir.path().join("missing.yaml"), env_from(&[])).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.packs.sizes, vec![250, 500, 1000, 2000, 5000]);
        assert!(!config.database.is_configured());
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn reads_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9090\npacks:\n  sizes: [23, 31, 53]\nlimits:\n  max_order: 1000\nlogging:\n  format: json"
        )
        .unwrap();

        let config = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.packs.sizes, vec![23, 31, 53]);
        assert_eq!(config.limits.max_order, 1000);
        assert_eq!(config.limits.max_pack_size, 1_000_000);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 9090\ndatabase:\n  host: filehost").unwrap();

        let env = env_from(&[("PORT", "7000"), ("DB_HOST", "envhost"), ("DB_NAME", "packs")]);
        let config = AppConfig::load_with_env(file.path(), env).unwrap();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.host.as_deref(), Some("envhost"));
        assert_eq!(config.database.dbname.as_deref(), Some("packs"));
        assert!(config.database.is_configured());
    }

    #[test]
    fn unparseable_port_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_from(&[("PORT", "not-a-port")]);
        let config = AppConfig::load_with_env(dir.path().join("none.yaml"), env).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn malformed_yaml_is_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [not, a, map").unwrap();
        let err = AppConfig::load_with_env(file.path(), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_yaml("  \n").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn database_url_configures_database() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_from(&[("DATABASE_URL", "postgres://u:p@db:5433/packs?sslmode=require")]);
        let config = AppConfig::load_with_env(dir.path().join("none.yaml"), env).unwrap();
        assert!(config.database.is_configured());
        assert!(config.database.connect_options().is_ok());
    }

    #[test]
    fn bad_sslmode_is_rejected() {
        let config = DatabaseConfig {
            host: Some("localhost".to_string()),
            sslmode: "sometimes".to_string(),
            ..DatabaseConfig::default()
        };
        let err = config.connect_options().unwrap_err();
        assert!(err.to_string().contains("sslmode"));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:3000");
    }
}
