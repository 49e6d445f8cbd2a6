//! Line-oriented reading from a byte stream.
//!
//! Lines are read one byte at a time so that nothing past the blank line that
//! ends the request head is consumed; the body reader picks up exactly where
//! the last line stopped.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::error::HttpError;

/// How a stalled read is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPolicy {
    /// Pause between retries after a would-block signal.
    pub backoff: Duration,
    /// Upper bound for reading one line, or the whole body. `None` waits forever.
    pub deadline: Option<Duration>,
    /// Longest accepted line, terminator excluded.
    pub max_line: usize,
}

/// Default cap on one request or header line (8 KiB).
pub const DEFAULT_MAX_LINE: usize = 8 * 1024;

impl Default for ReadPolicy {
    fn default() -> Self {
        Self {
            backoff: Duration::from_millis(1),
            deadline: None,
            max_line: DEFAULT_MAX_LINE,
        }
    }
}

impl ReadPolicy {
    /// Runs a read under the deadline, if one is set.
    pub async fn bounded<T, F>(&self, read: F) -> Result<T, HttpError>
    where
        F: Future<Output = Result<T, HttpError>>,
    {
        match self.deadline {
            Some(limit) => tokio::time::timeout(limit, read)
                .await
                .map_err(|_| HttpError::ReadTimeout(limit))?,
            None => read.await,
        }
    }
}

pub struct LineReader<R> {
    inner: R,
    policy: ReadPolicy,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R, policy: ReadPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    /// Access to the underlying stream, positioned right after the last line read.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads one line, without its terminator.
    ///
    /// `\r` bytes are dropped wherever they appear and `\n` ends the line, so
    /// both CRLF and bare LF framing are accepted. Every other byte is taken
    /// as a Latin-1 character. End of stream ends a partially read line; end
    /// of stream before any byte of the line is a disconnect. A line longer
    /// than the policy's `max_line` fails without reading further.
    pub async fn read_line(&mut self) -> Result<String, HttpError> {
        let policy = self.policy;
        policy.bounded(self.poll_line()).await
    }

    async fn poll_line(&mut self) -> Result<String, HttpError> {
        let mut line = String::new();
        let mut received = 0;
        let mut kept = 0;
        let mut byte = [0u8; 1];

        loop {
            match self.inner.read(&mut byte).await {
                Ok(0) if received == 0 => {
                    return Err(HttpError::PeerDisconnected {
                        received,
                        expected: None,
                    });
                }
                Ok(0) => return Ok(line),
                Ok(_) => {
                    received += 1;
                    match byte[0] {
                        b'\n' => return Ok(line),
                        b'\r' => {}
                        b => {
                            kept += 1;
                            if kept > self.policy.max_line {
                                return Err(HttpError::LineTooLong {
                                    limit: self.policy.max_line,
                                });
                            }
                            line.push(char::from(b));
                        }
                    }
                }
                Err(e) if is_transient(&e) => {
                    tokio::time::sleep(self.policy.backoff).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// A read that produced nothing yet but left the connection open.
fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_consecutive_lines() {
        let input: &[u8] = b"first\r\nsecond\nthird";
        let mut reader = LineReader::new(input, ReadPolicy::default());

        assert_eq!(reader.read_line().await.unwrap(), "first");
        assert_eq!(reader.read_line().await.unwrap(), "second");
        assert_eq!(reader.read_line().await.unwrap(), "third");
        assert!(matches!(
            reader.read_line().await,
            Err(HttpError::PeerDisconnected { .. })
        ));
    }

    #[tokio::test]
    async fn latin1_bytes_do_not_fail() {
        let input: &[u8] = b"caf\xe9\n";
        let mut reader = LineReader::new(input, ReadPolicy::default());

        assert_eq!(reader.read_line().await.unwrap(), "caf\u{e9}");
    }

    #[tokio::test]
    async fn line_at_limit_is_accepted() {
        let input: &[u8] = b"abcd\r\nabcde\r\n";
        let policy = ReadPolicy {
            max_line: 4,
            ..ReadPolicy::default()
        };
        let mut reader = LineReader::new(input, policy);

        assert_eq!(reader.read_line().await.unwrap(), "abcd");
        assert!(matches!(
            reader.read_line().await,
            Err(HttpError::LineTooLong { limit: 4 })
        ));
    }
}
