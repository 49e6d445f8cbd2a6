use std::collections::HashMap;
use std::fmt;

use crate::http::error::HttpError;

/// Header block of a request.
///
/// Names are kept exactly as sent (no case folding); a repeated name keeps the
/// value of its last occurrence.
pub type Headers = HashMap<String, String>;

/// HTTP request methods.
///
/// GET and POST are the two methods the server dispatches to a handler. Any
/// other token is kept verbatim (upper-cased) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    Other(String),
}

impl Method {
    /// Parses a method token, normalising it to upper case first.
    ///
    /// # Example
    ///
    /// ```
    /// # use formhttpd::http::request::Method;
    /// assert_eq!(Method::parse("get"), Method::GET);
    /// assert_eq!(Method::parse("Delete"), Method::Other("DELETE".to_string()));
    /// ```
    pub fn parse(token: &str) -> Self {
        let upper = token.to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            _ => Method::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request line and headers of a parsed request.
///
/// The body is not part of the request head; the connection reads it
/// separately and hands it to the POST handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method, upper-cased
    pub method: Method,
    /// Request target exactly as sent, not unescaped (e.g. "/form?x=%20")
    pub target: String,
    /// Protocol version token (typically "HTTP/1.0")
    pub version: String,
    pub headers: Headers,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: Headers,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: Headers::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            target: self.target.ok_or("target missing")?,
            version: self.version.unwrap_or_else(|| "HTTP/1.0".to_string()),
            headers: self.headers,
        })
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by its exact, case-sensitive name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// The declared body length.
    ///
    /// `Ok(None)` when there is no `Content-Length` header; an error when the
    /// header is present but not a non-negative integer.
    pub fn content_length(&self) -> Result<Option<usize>, HttpError> {
        self.header("Content-Length")
            .map(|v| {
                v.trim()
                    .parse::<usize>()
                    .map_err(|_| HttpError::InvalidContentLength(v.to_string()))
            })
            .transpose()
    }
}
