//! formhttpd - minimal HTTP/1.0 configuration server
//!
//! A hand-rolled HTTP/1.0 core (line reader, request parser, body reader,
//! response writer, per-connection state machine, accept loop) and the
//! station configuration page served on top of it.

pub mod app;
pub mod config;
pub mod http;
pub mod server;
