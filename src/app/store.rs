//! Persisted station configuration, shared by all connections.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Settings edited through the config page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    /// Talkgroup selected at startup (numeric, kept as entered)
    pub default_talkgroup: String,
    /// Seconds before falling back to the default talkgroup
    pub default_timeout: u32,
    pub use_voice_prompts: bool,
    /// Remote courtesy tone
    pub use_courtesy_tone: bool,
    pub use_local_courtesy_tone: bool,
}

/// Thread-safe handle to the configuration document.
///
/// Clones share the same in-memory value. Saves are serialised by the write
/// lock and hit the file before the new value becomes visible.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    current: Arc<RwLock<StationConfig>>,
}

impl ConfigStore {
    /// Loads the document at `path`, or starts from defaults if it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let current = match tokio::fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => StationConfig::default(),
            Ok(text) => serde_yaml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => StationConfig::default(),
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        };

        Ok(Self {
            path,
            current: Arc::new(RwLock::new(current)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self) -> StationConfig {
        self.current.read().await.clone()
    }

    pub async fn save(&self, config: StationConfig) -> anyhow::Result<()> {
        let mut current = self.current.write().await;

        let text = serde_yaml::to_string(&config)?;
        let staging = self.path.with_extension("tmp");
        tokio::fs::write(&staging, text)
            .await
            .with_context(|| format!("writing {}", staging.display()))?;
        tokio::fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("replacing {}", self.path.display()))?;

        *current = config;
        Ok(())
    }
}
