use std::io;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

fn default_host() -> String { DEFAULT_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_PORT }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Read the file at `path`; only a missing file falls back to [`from_env`].
/// An unreadable or malformed file is an error.
pub fn load_or_env(path: &str) -> Result<AppConfig> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse(&content).map_err(|e| {
            warn!(%path, error = %e, "config file malformed");
            e.context(format!("invalid config file {path}"))
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(from_env()),
        Err(e) => {
            warn!(%path, error = %e, "config file unreadable");
            Err(e).with_context(|| format!("cannot read config file {path}"))
        }
    }
}

// A set but unparsable variable is reported and treated as unset.
fn parse_env_value<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring invalid environment value");
            None
        }
    }
}

fn env_value<T: FromStr>(name: &str) -> Option<T> {
    parse_env_value(name, std::env::var(name).ok())
}

/// Build the server section from `SERVER_HOST`, `SERVER_PORT` and `TOKIO_WORKER_THREADS`.
pub fn from_env() -> AppConfig {
    let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| default_host());
    let port = env_value::<u16>("SERVER_PORT").unwrap_or(DEFAULT_PORT);
    let worker_threads = env_value::<usize>("TOKIO_WORKER_THREADS");
    AppConfig { server: ServerConfig { host, port, worker_threads } }
}

impl AppConfig {
    /// Prefer the TOML file, fall back to environment variables when it is missing.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_or_env(&config_path())?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}
