use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::error::HttpError;
use crate::http::response::{Response, StatusCode};

pub const HTTP_VERSION: &str = "HTTP/1.0";

/// Buffered output is pushed to the stream once it grows past this.
const COMMIT_THRESHOLD: usize = 8 * 1024;

/// Where a response is in its write-once sequence.
///
/// `NotStarted → StatusLine → Headers → Body`; each step only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    StatusLine,
    Headers,
    Body,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::NotStarted => "nothing",
            Phase::StatusLine => "status line",
            Phase::Headers => "headers",
            Phase::Body => "end of headers",
        }
    }
}

/// Streams one response onto a connection.
///
/// Output is held in memory until it passes `COMMIT_THRESHOLD` or the writer
/// is flushed. Until then `discard` can still take the response back, which
/// lets the connection replace a half-built response with the failure one.
pub struct ResponseWriter {
    stream: Box<dyn AsyncWrite + Send + Unpin>,
    buffer: BytesMut,
    phase: Phase,
    status: Option<u16>,
    committed: usize,
}

impl ResponseWriter {
    pub fn new<W>(stream: W) -> Self
    where
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            stream: Box::new(stream),
            buffer: BytesMut::with_capacity(4096),
            phase: Phase::NotStarted,
            status: None,
            committed: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a status line has been written.
    pub fn is_started(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    /// Status code of the started response, if any.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Whether any byte has already reached the stream.
    pub fn is_committed(&self) -> bool {
        self.committed > 0
    }

    pub async fn write_status(&mut self, code: u16, reason: &str) -> Result<(), HttpError> {
        self.expect(Phase::NotStarted, "status line")?;
        let line = format!("{HTTP_VERSION} {code} {reason}\r\n");
        self.push(line.as_bytes()).await?;
        self.phase = Phase::StatusLine;
        self.status = Some(code);
        Ok(())
    }

    pub async fn write_header(&mut self, name: &str, value: &str) -> Result<(), HttpError> {
        if !matches!(self.phase, Phase::StatusLine | Phase::Headers) {
            return Err(HttpError::response_state("header", self.phase.name()));
        }
        let line = format!("{name}: {value}\r\n");
        self.push(line.as_bytes()).await?;
        self.phase = Phase::Headers;
        Ok(())
    }

    /// Writes the blank line that separates headers from the body.
    pub async fn end_headers(&mut self) -> Result<(), HttpError> {
        if !matches!(self.phase, Phase::StatusLine | Phase::Headers) {
            return Err(HttpError::response_state("end of headers", self.phase.name()));
        }
        self.push(b"\r\n").await?;
        self.phase = Phase::Body;
        Ok(())
    }

    pub async fn write_body(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        self.expect(Phase::Body, "body")?;
        self.push(bytes).await
    }

    /// Copies a reader into the body until it ends. Returns the byte count.
    pub async fn write_body_from<R>(&mut self, reader: &mut R) -> Result<u64, HttpError>
    where
        R: AsyncRead + Unpin,
    {
        self.expect(Phase::Body, "body")?;
        let mut chunk = [0u8; 4096];
        let mut total = 0u64;
        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                return Ok(total);
            }
            self.push(&chunk[..n]).await?;
            total += n as u64;
        }
    }

    /// `200 OK` with the given content type and `Connection: close`, ready for body bytes.
    pub async fn write_success(&mut self, content_type: &str) -> Result<(), HttpError> {
        let status = StatusCode::Ok;
        self.write_status(status.as_u16(), status.reason_phrase()).await?;
        self.write_header("Content-Type", content_type).await?;
        self.write_header("Connection", "close").await?;
        self.end_headers().await
    }

    /// The canned failure response: `404 File not found`, `Connection: close`, empty body.
    pub async fn write_failure(&mut self) -> Result<(), HttpError> {
        let status = StatusCode::NotFound;
        self.write_status(status.as_u16(), status.reason_phrase()).await?;
        self.write_header("Connection", "close").await?;
        self.end_headers().await
    }

    /// Writes a fully assembled response.
    pub async fn send(&mut self, response: &Response) -> Result<(), HttpError> {
        let status = response.status;
        self.write_status(status.as_u16(), status.reason_phrase()).await?;
        for (name, value) in &response.headers {
            self.write_header(name, value).await?;
        }
        self.end_headers().await?;
        self.write_body(&response.body).await
    }

    /// Drops buffered output so a different response can be started.
    ///
    /// Returns `false`, leaving the writer untouched, once bytes have been
    /// committed to the stream.
    pub fn discard(&mut self) -> bool {
        if self.is_committed() {
            return false;
        }
        self.buffer.clear();
        self.phase = Phase::NotStarted;
        self.status = None;
        true
    }

    pub async fn flush(&mut self) -> Result<(), HttpError> {
        self.commit().await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Flushes everything and shuts the write side down.
    pub async fn shutdown(&mut self) -> Result<(), HttpError> {
        self.flush().await?;
        self.stream.shutdown().await?;
        Ok(())
    }

    fn expect(&self, phase: Phase, operation: &'static str) -> Result<(), HttpError> {
        if self.phase != phase {
            return Err(HttpError::response_state(operation, self.phase.name()));
        }
        Ok(())
    }

    async fn push(&mut self, bytes: &[u8]) -> Result<(), HttpError> {
        self.buffer.extend_from_slice(bytes);
        if self.buffer.len() >= COMMIT_THRESHOLD {
            self.commit().await?;
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), HttpError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        self.stream.write_all(&self.buffer).await?;
        self.committed += self.buffer.len();
        self.buffer.clear();
        Ok(())
    }
}
