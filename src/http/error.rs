use std::io;
use std::time::Duration;

use thiserror::Error;

/// Faults raised while reading a request or writing its response.
///
/// Everything here is recoverable at the connection boundary: the connection
/// handler turns it into the canned failure response and closes the socket.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid http request line: {0:?}")]
    MalformedRequestLine(String),

    #[error("invalid http header line: {0:?}")]
    MalformedHeaderLine(String),

    #[error("invalid content-length header: {0:?}")]
    InvalidContentLength(String),

    #[error("content-length {declared} exceeds the limit {max}")]
    PayloadTooLarge { declared: usize, max: usize },

    /// `expected` is the declared body length; `None` while reading the request head.
    #[error("client disconnected after {received}{} bytes", of_expected(.expected))]
    PeerDisconnected {
        received: usize,
        expected: Option<usize>,
    },

    #[error("line longer than {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("read stalled for {0:?}")]
    ReadTimeout(Duration),

    #[error("response {operation} not allowed after {state}")]
    ResponseState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl HttpError {
    pub fn response_state(operation: &'static str, state: &'static str) -> Self {
        Self::ResponseState { operation, state }
    }
}

fn of_expected(expected: &Option<usize>) -> String {
    expected.map(|n| format!(" of {n}")).unwrap_or_default()
}
