use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, info};

use crate::config::ServerConfig;
use crate::http::connection::{Connection, ConnectionSettings};
use crate::http::handler::Handler;
use crate::server::tracker::ConnectionTracker;

/// A bound listener that spawns one task per accepted connection.
///
/// There is no pool and no admission limit: every connection gets its own
/// task for as long as it lives.
pub struct Server {
    listener: TcpListener,
    handler: Arc<dyn Handler>,
    settings: ConnectionSettings,
    accept_pause: Duration,
    tracker: ConnectionTracker,
}

impl Server {
    pub async fn bind(cfg: &ServerConfig, handler: Arc<dyn Handler>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(&cfg.listen_addr)
            .await
            .with_context(|| format!("binding {}", cfg.listen_addr))?;
        info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            handler,
            settings: cfg.connection_settings(),
            accept_pause: cfg.accept_pause(),
            tracker: ConnectionTracker::new(),
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    /// Accepts connections until accepting fails; that error is returned.
    pub async fn serve(self) -> anyhow::Result<()> {
        loop {
            let (socket, peer) = self.listener.accept().await.context("accepting connection")?;
            debug!("Accepted connection from {}", peer);

            let guard = self.tracker.track();
            let conn = Connection::new(socket, self.handler.clone(), self.settings);
            tokio::spawn(
                async move {
                    let _guard = guard;
                    if let Err(e) = conn.run().await {
                        debug!(error = %e, "Connection closed with error");
                    }
                }
                .instrument(tracing::info_span!("conn", %peer)),
            );

            if !self.accept_pause.is_zero() {
                tokio::time::sleep(self.accept_pause).await;
            }
        }
    }
}

pub async fn run(cfg: &ServerConfig, handler: Arc<dyn Handler>) -> anyhow::Result<()> {
    Server::bind(cfg, handler).await?.serve().await
}
