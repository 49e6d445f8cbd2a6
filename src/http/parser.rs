use tokio::io::AsyncRead;

use crate::http::error::HttpError;
use crate::http::line::LineReader;
use crate::http::request::{Headers, Method, Request};

/// The first line of a request, split into its three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: String,
}

/// Splits a request line on single spaces.
///
/// Exactly three fields are required; doubled spaces produce empty fields and
/// therefore fail too.
pub fn parse_request_line(line: &str) -> Result<RequestLine, HttpError> {
    let tokens: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = tokens.as_slice() else {
        return Err(HttpError::MalformedRequestLine(line.to_string()));
    };

    Ok(RequestLine {
        method: Method::parse(method),
        target: target.to_string(),
        version: version.to_string(),
    })
}

/// Parses one `Name: value` header line.
///
/// The name is everything before the first colon, untouched. Spaces right
/// after the colon are skipped; the rest of the value is kept as is.
pub fn parse_header_line(line: &str) -> Result<(String, String), HttpError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| HttpError::MalformedHeaderLine(line.to_string()))?;

    Ok((name.to_string(), value.trim_start_matches(' ').to_string()))
}

/// Reads header lines up to and including the blank line that ends them.
pub async fn parse_headers<R>(reader: &mut LineReader<R>) -> Result<Headers, HttpError>
where
    R: AsyncRead + Unpin,
{
    let mut headers = Headers::new();

    loop {
        let line = reader.read_line().await?;
        if line.is_empty() {
            return Ok(headers);
        }

        let (name, value) = parse_header_line(&line)?;
        headers.insert(name, value);
    }
}

/// Reads the request line and the header block.
pub async fn read_request_head<R>(reader: &mut LineReader<R>) -> Result<Request, HttpError>
where
    R: AsyncRead + Unpin,
{
    let line = reader.read_line().await?;
    let RequestLine {
        method,
        target,
        version,
    } = parse_request_line(&line)?;
    let headers = parse_headers(reader).await?;

    Ok(Request {
        method,
        target,
        version,
        headers,
    })
}
