//! HTTP/1.0 protocol implementation.
//!
//! One request per connection, no keep-alive, no chunked encoding. The
//! request head is read line by line straight off the socket and the body is
//! read by its declared `Content-Length`.
//!
//! # Architecture
//!
//! - **`line`**: pulls single CR/LF-normalised lines from a byte stream
//! - **`parser`**: request line and header block parsing on top of `line`
//! - **`body`**: Content-Length bounded body reading with a size cap
//! - **`request`**: parsed request head representation
//! - **`response`**: status codes and in-memory responses
//! - **`writer`**: write-once response state machine over the socket
//! - **`handler`**: the GET/POST callback trait applications implement
//! - **`connection`**: the per-connection state machine tying it together
//! - **`error`**: protocol fault taxonomy
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │      Idle        │ ← Wait for the request line
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │  RequestParsed   │ ← Read headers up to the blank line
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │  HeadersParsed   │ ← GET: on_get / POST: read body, on_post
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatched     │ ← Flush the handler's response
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │ ResponseWritten  │
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Always reached; socket shut down
//!        └──────────────────┘
//! ```
//!
//! Any fault before `ResponseWritten` skips straight to the failure response
//! (`404 File not found`) and then `Closed`.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use formhttpd::http::connection::{Connection, ConnectionSettings};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let handler = Arc::new(MyHandler);
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let conn = Connection::new(socket, handler, ConnectionSettings::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod body;
pub mod connection;
pub mod error;
pub mod handler;
pub mod line;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
