use async_trait::async_trait;
use bytes::Bytes;

use crate::http::request::Request;
use crate::http::writer::ResponseWriter;

/// Application callbacks driven by the connection handler.
///
/// One connection never calls into its handler concurrently, but separate
/// connections call the same handler in parallel, so implementations must be
/// `Send + Sync` and guard their own shared state.
///
/// Returning an error before any response byte reached the socket makes the
/// connection answer with the canned failure response instead.
#[async_trait]
pub trait Handler: Send + Sync + 'static {
    async fn on_get(&self, request: &Request, out: &mut ResponseWriter) -> anyhow::Result<()>;

    /// `body` holds exactly `Content-Length` bytes, or nothing if the header was absent.
    async fn on_post(
        &self,
        request: &Request,
        body: Bytes,
        out: &mut ResponseWriter,
    ) -> anyhow::Result<()>;

    /// Any other method, when the server passes them through.
    ///
    /// Writes nothing by default, leaving an empty reply.
    async fn on_other(&self, _request: &Request, _out: &mut ResponseWriter) -> anyhow::Result<()> {
        Ok(())
    }
}
