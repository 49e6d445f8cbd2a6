use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, info};

use crate::app::assets::{AssetDir, content_type};
use crate::app::form::parse_form;
use crate::app::page;
use crate::app::store::ConfigStore;
use crate::http::handler::Handler;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Serves the config form on GET and stores the submission on POST.
pub struct ConfigPageHandler {
    store: ConfigStore,
    assets: Option<AssetDir>,
}

impl ConfigPageHandler {
    pub fn new(store: ConfigStore, assets: Option<AssetDir>) -> Self {
        Self { store, assets }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Streams a static file if the target names one. Returns whether it did.
    async fn serve_asset(&self, target: &str, out: &mut ResponseWriter) -> anyhow::Result<bool> {
        let Some(path) = self.assets.as_ref().and_then(|dir| dir.resolve(target)) else {
            return Ok(false);
        };

        let is_file = tokio::fs::metadata(&path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Ok(false);
        }

        let mut file = tokio::fs::File::open(&path).await?;
        out.write_success(content_type(&path)).await?;
        let sent = out.write_body_from(&mut file).await?;
        debug!(path = %path.display(), bytes = sent, "Served asset");
        Ok(true)
    }
}

#[async_trait]
impl Handler for ConfigPageHandler {
    async fn on_get(&self, request: &Request, out: &mut ResponseWriter) -> anyhow::Result<()> {
        if self.serve_asset(&request.target, out).await? {
            return Ok(());
        }

        let config = self.store.get().await;
        out.send(&Response::html(page::config_page(&config))).await?;
        Ok(())
    }

    async fn on_post(
        &self,
        _request: &Request,
        body: Bytes,
        out: &mut ResponseWriter,
    ) -> anyhow::Result<()> {
        let config = parse_form(&body)?;
        self.store.save(config.clone()).await?;
        info!(
            talkgroup = %config.default_talkgroup,
            timeout = config.default_timeout,
            voice_prompts = config.use_voice_prompts,
            courtesy_tone = config.use_courtesy_tone,
            local_courtesy_tone = config.use_local_courtesy_tone,
            "Configuration saved"
        );

        out.send(&Response::html(page::saved_page())).await?;
        Ok(())
    }
}
