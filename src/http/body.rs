//! Content-Length bounded body reading.

use std::cmp;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::error::HttpError;

/// Largest single read issued while collecting a body.
pub const READ_CHUNK: usize = 4096;

/// Default cap on a declared body length (10 MiB).
pub const DEFAULT_MAX_BODY: usize = 10 * 1024 * 1024;

/// Reads exactly `declared` bytes.
///
/// A declared length above `max` is refused before anything is read. The
/// stream ending while bytes are still outstanding is a disconnect; a
/// satisfied length is never an error, even if the peer closes right after.
pub async fn read_body<R>(reader: &mut R, declared: usize, max: usize) -> Result<Bytes, HttpError>
where
    R: AsyncRead + Unpin,
{
    if declared > max {
        return Err(HttpError::PayloadTooLarge { declared, max });
    }

    let mut body = BytesMut::with_capacity(declared);
    let mut chunk = [0u8; READ_CHUNK];

    while body.len() < declared {
        let want = cmp::min(READ_CHUNK, declared - body.len());
        let n = reader.read(&mut chunk[..want]).await?;

        if n == 0 {
            return Err(HttpError::PeerDisconnected {
                received: body.len(),
                expected: Some(declared),
            });
        }

        body.extend_from_slice(&chunk[..n]);
    }

    Ok(body.freeze())
}
