use std::sync::Arc;

use formhttpd::app::assets::AssetDir;
use formhttpd::app::{ConfigPageHandler, ConfigStore};
use formhttpd::config::Config;
use formhttpd::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let store = ConfigStore::open(&cfg.store.path).await?;
    tracing::info!("Configuration store at {}", store.path().display());
    let assets = cfg.assets.dir.clone().map(AssetDir::new);
    let handler = Arc::new(ConfigPageHandler::new(store, assets));

    tokio::select! {
        res = server::listener::run(&cfg.server, handler) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
