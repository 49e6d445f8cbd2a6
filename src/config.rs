use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::body::DEFAULT_MAX_BODY;
use crate::http::connection::{ConnectionSettings, MethodPolicy};
use crate::http::line::{DEFAULT_MAX_LINE, ReadPolicy};

/// Environment variable naming the YAML configuration file.
pub const CONFIG_ENV: &str = "FORMHTTPD_CONFIG";

/// Environment variable overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Largest accepted `Content-Length`, in bytes
    pub max_body_size: usize,
    /// Deadline for each request line, header line and the body; absent means wait forever
    pub read_deadline_ms: Option<u64>,
    /// Longest accepted request or header line, in bytes
    pub max_line_length: usize,
    /// Pause before retrying a read that had no data yet
    pub read_backoff_ms: u64,
    /// Pause after each accepted connection
    pub accept_pause_ms: u64,
    pub unknown_methods: MethodPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            max_body_size: DEFAULT_MAX_BODY,
            read_deadline_ms: None,
            max_line_length: DEFAULT_MAX_LINE,
            read_backoff_ms: 1,
            accept_pause_ms: 1,
            unknown_methods: MethodPolicy::default(),
        }
    }
}

impl ServerConfig {
    pub fn read_policy(&self) -> ReadPolicy {
        ReadPolicy {
            backoff: Duration::from_millis(self.read_backoff_ms),
            deadline: self.read_deadline_ms.map(Duration::from_millis),
            max_line: self.max_line_length,
        }
    }

    pub fn accept_pause(&self) -> Duration {
        Duration::from_millis(self.accept_pause_ms)
    }

    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            read_policy: self.read_policy(),
            max_body_size: self.max_body_size,
            method_policy: self.unknown_methods,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// File holding the persisted station configuration
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("formhttpd-config.yaml"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory static files are served from; none are served when unset
    pub dir: Option<PathBuf>,
}

impl Config {
    /// Loads the file named by `FORMHTTPD_CONFIG` (defaults when unset),
    /// then applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}
