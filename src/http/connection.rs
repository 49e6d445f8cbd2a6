use std::sync::Arc;

use bytes::Bytes;
use serde::Deserialize;
use tokio::io::{AsyncRead, AsyncWrite, BufReader, ReadHalf};
use tracing::{debug, info, warn};

use crate::http::body::{DEFAULT_MAX_BODY, read_body};
use crate::http::handler::Handler;
use crate::http::line::{LineReader, ReadPolicy};
use crate::http::parser::{RequestLine, parse_headers, parse_request_line};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// What happens to methods other than GET and POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodPolicy {
    /// Hand them to `Handler::on_other`.
    #[default]
    Passthrough,
    /// Answer `405 Method Not Allowed` without calling the handler.
    Reject,
}

/// Per-connection limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub read_policy: ReadPolicy,
    pub max_body_size: usize,
    pub method_policy: MethodPolicy,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            read_policy: ReadPolicy::default(),
            max_body_size: DEFAULT_MAX_BODY,
            method_policy: MethodPolicy::default(),
        }
    }
}

pub enum ConnectionState {
    Idle,
    RequestParsed(RequestLine),
    HeadersParsed(Request),
    Dispatched,
    ResponseWritten,
    Closed,
}

/// One accepted connection, serving exactly one request.
pub struct Connection<S> {
    reader: LineReader<BufReader<ReadHalf<S>>>,
    writer: ResponseWriter,
    handler: Arc<dyn Handler>,
    settings: ConnectionSettings,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Send + Unpin + 'static,
{
    pub fn new(stream: S, handler: Arc<dyn Handler>, settings: ConnectionSettings) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: LineReader::new(BufReader::new(read_half), settings.read_policy),
            writer: ResponseWriter::new(write_half),
            handler,
            settings,
            state: ConnectionState::Idle,
        }
    }

    /// Serves the request and closes the connection.
    ///
    /// The stream is flushed and shut down on every path. A fault before the
    /// response reached the wire is answered with the failure response and
    /// then returned.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let fault = match self.process().await {
            Ok(()) => None,
            Err(e) => {
                self.fail(&e).await;
                Some(e)
            }
        };

        self.state = ConnectionState::Closed;
        let closed = self.writer.shutdown().await;

        match (fault, closed) {
            (Some(e), _) => Err(e),
            (None, Err(e)) => Err(e.into()),
            (None, Ok(())) => Ok(()),
        }
    }

    async fn process(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Idle => {
                    let line = self.reader.read_line().await?;
                    self.state = ConnectionState::RequestParsed(parse_request_line(&line)?);
                }

                ConnectionState::RequestParsed(line) => {
                    let headers = parse_headers(&mut self.reader).await?;
                    self.state = ConnectionState::HeadersParsed(Request {
                        method: line.method,
                        target: line.target,
                        version: line.version,
                        headers,
                    });
                }

                ConnectionState::HeadersParsed(request) => {
                    info!(method = %request.method, target = %request.target, "Dispatching request");
                    self.dispatch(&request).await?;
                    self.state = ConnectionState::Dispatched;
                }

                ConnectionState::Dispatched => {
                    if !self.writer.is_started() {
                        debug!("Handler wrote no response");
                    }
                    self.writer.flush().await?;
                    self.state = ConnectionState::ResponseWritten;
                }

                ConnectionState::ResponseWritten | ConnectionState::Closed => return Ok(()),
            }
        }
    }

    async fn dispatch(&mut self, request: &Request) -> anyhow::Result<()> {
        match &request.method {
            Method::GET => self.handler.on_get(request, &mut self.writer).await,

            Method::POST => {
                let policy = self.settings.read_policy;
                let body = match request.content_length()? {
                    Some(declared) => {
                        let max = self.settings.max_body_size;
                        policy
                            .bounded(read_body(self.reader.get_mut(), declared, max))
                            .await?
                    }
                    None => Bytes::new(),
                };
                self.handler.on_post(request, body, &mut self.writer).await
            }

            Method::Other(_) => match self.settings.method_policy {
                MethodPolicy::Passthrough => self.handler.on_other(request, &mut self.writer).await,
                MethodPolicy::Reject => {
                    self.writer.send(&Response::method_not_allowed()).await?;
                    Ok(())
                }
            },
        }
    }

    async fn fail(&mut self, error: &anyhow::Error) {
        warn!(error = %error, "Request failed");

        if !self.writer.discard() {
            warn!(
                status = ?self.writer.status(),
                "Response already on the wire, closing without failure response"
            );
            return;
        }

        if let Err(e) = self.writer.write_failure().await {
            debug!(error = %e, "Could not write failure response");
        }
    }
}
