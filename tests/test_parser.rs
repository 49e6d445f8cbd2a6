use formhttpd::http::error::HttpError;
use formhttpd::http::line::{LineReader, ReadPolicy};
use formhttpd::http::parser::{parse_header_line, parse_headers, parse_request_line, read_request_head};
use formhttpd::http::request::Method;

fn reader(input: &'static [u8]) -> LineReader<&'static [u8]> {
    LineReader::new(input, ReadPolicy::default())
}

#[test]
fn test_parse_request_line_three_fields() {
    let line = parse_request_line("POST /form HTTP/1.0").unwrap();

    assert_eq!(line.method, Method::POST);
    assert_eq!(line.target, "/form");
    assert_eq!(line.version, "HTTP/1.0");
}

#[test]
fn test_parse_request_line_uppercases_method() {
    let line = parse_request_line("post /form HTTP/1.0").unwrap();
    assert_eq!(line.method, Method::POST);

    let line = parse_request_line("Delete /x HTTP/1.0").unwrap();
    assert_eq!(line.method, Method::Other("DELETE".to_string()));
}

#[test]
fn test_parse_request_line_keeps_target_escaped() {
    let line = parse_request_line("GET /a%20b?x=1&y=%2F HTTP/1.0").unwrap();
    assert_eq!(line.target, "/a%20b?x=1&y=%2F");
}

#[test]
fn test_parse_request_line_wrong_token_count() {
    let bad = [
        "",
        "GET",
        "GET /",
        "GET / HTTP/1.0 extra",
        "GET  / HTTP/1.0",
        "GET / HTTP/1.0 ",
    ];

    for line in bad {
        let result = parse_request_line(line);
        assert!(
            matches!(result, Err(HttpError::MalformedRequestLine(_))),
            "accepted {line:?}"
        );
    }
}

#[test]
fn test_parse_header_line_strips_leading_spaces_only() {
    let (name, value) = parse_header_line("Host:    example.com ").unwrap();
    assert_eq!(name, "Host");
    assert_eq!(value, "example.com ");
}

#[test]
fn test_parse_header_line_splits_on_first_colon() {
    let (name, value) = parse_header_line("Referer: http://x:8080/").unwrap();
    assert_eq!(name, "Referer");
    assert_eq!(value, "http://x:8080/");
}

#[test]
fn test_parse_header_line_keeps_name_verbatim() {
    let (name, value) = parse_header_line("content-length :7").unwrap();
    assert_eq!(name, "content-length ");
    assert_eq!(value, "7");
}

#[test]
fn test_parse_header_line_empty_value() {
    let (name, value) = parse_header_line("X-Empty:").unwrap();
    assert_eq!(name, "X-Empty");
    assert_eq!(value, "");
}

#[test]
fn test_parse_malformed_header() {
    let result = parse_header_line("BrokenHeader");
    assert!(matches!(result, Err(HttpError::MalformedHeaderLine(_))));
}

#[tokio::test]
async fn test_parse_headers_last_duplicate_wins() {
    let mut input = reader(b"X-Id: 1\r\nX-Id: 2\r\nHost: a\r\n\r\n");
    let headers = parse_headers(&mut input).await.unwrap();

    assert_eq!(headers.len(), 2);
    assert_eq!(headers.get("X-Id").unwrap(), "2");
    assert_eq!(headers.get("Host").unwrap(), "a");
}

#[tokio::test]
async fn test_parse_headers_case_sensitive_names() {
    let mut input = reader(b"Host: a\r\nhost: b\r\n\r\n");
    let headers = parse_headers(&mut input).await.unwrap();

    assert_eq!(headers.get("Host").unwrap(), "a");
    assert_eq!(headers.get("host").unwrap(), "b");
}

#[tokio::test]
async fn test_parse_headers_rejects_line_without_colon() {
    let mut input = reader(b"Host: a\r\nnot a header\r\n\r\n");
    let result = parse_headers(&mut input).await;

    assert!(matches!(result, Err(HttpError::MalformedHeaderLine(line)) if line == "not a header"));
}

#[tokio::test]
async fn test_read_request_head_simple_get() {
    let mut input = reader(b"GET /status HTTP/1.0\r\nHost: x\r\n\r\n");
    let request = read_request_head(&mut input).await.unwrap();

    assert_eq!(request.method, Method::GET);
    assert_eq!(request.target, "/status");
    assert_eq!(request.version, "HTTP/1.0");
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.header("Host"), Some("x"));
}

#[tokio::test]
async fn test_read_request_head_bare_lf() {
    let mut input = reader(b"GET / HTTP/1.0\nHost: x\n\n");
    let request = read_request_head(&mut input).await.unwrap();

    assert_eq!(request.target, "/");
    assert_eq!(request.header("Host"), Some("x"));
}

#[tokio::test]
async fn test_read_request_head_no_headers() {
    let mut input = reader(b"GET / HTTP/1.0\r\n\r\n");
    let request = read_request_head(&mut input).await.unwrap();

    assert!(request.headers.is_empty());
}

#[tokio::test]
async fn test_read_request_head_truncated() {
    let mut input = reader(b"GET / HTTP/1.0\r\nHost: x\r\n");
    let result = read_request_head(&mut input).await;

    assert!(matches!(result, Err(HttpError::PeerDisconnected { .. })));
}
