use formhttpd::http::body::{DEFAULT_MAX_BODY, READ_CHUNK, read_body};
use formhttpd::http::error::HttpError;
use tokio::io::AsyncWriteExt;

#[tokio::test]
async fn test_body_exact_length() {
    let mut input: &[u8] = b"abcde";
    let body = read_body(&mut input, 5, DEFAULT_MAX_BODY).await.unwrap();

    assert_eq!(&body[..], b"abcde");
}

#[tokio::test]
async fn test_body_peer_disconnects_early() {
    let mut input: &[u8] = b"abc";
    let result = read_body(&mut input, 5, DEFAULT_MAX_BODY).await;

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        HttpError::PeerDisconnected {
            received: 3,
            expected: Some(5)
        }
    ));
    assert_eq!(err.to_string(), "client disconnected after 3 of 5 bytes");
}

#[tokio::test]
async fn test_body_too_large_reads_nothing() {
    let mut input: &[u8] = b"0123456789";
    let result = read_body(&mut input, 11, 10).await;

    assert!(matches!(
        result,
        Err(HttpError::PayloadTooLarge { declared: 11, max: 10 })
    ));
    assert_eq!(input.len(), 10);
}

#[tokio::test]
async fn test_body_at_limit_is_accepted() {
    let mut input: &[u8] = b"0123456789";
    let body = read_body(&mut input, 10, 10).await.unwrap();

    assert_eq!(body.len(), 10);
}

#[tokio::test]
async fn test_body_larger_than_one_chunk() {
    let data: Vec<u8> = (0..READ_CHUNK * 3 + 17).map(|i| (i % 251) as u8).collect();
    let mut input: &[u8] = &data;

    let body = read_body(&mut input, data.len(), DEFAULT_MAX_BODY).await.unwrap();

    assert_eq!(&body[..], &data[..]);
}

#[tokio::test]
async fn test_body_arrives_in_pieces() {
    let (mut client, mut server) = tokio::io::duplex(64);

    let sender = tokio::spawn(async move {
        for piece in [&b"name="[..], &b"val"[..], &b"ue1"[..]] {
            client.write_all(piece).await.unwrap();
            tokio::task::yield_now().await;
        }
        client
    });

    let body = read_body(&mut server, 11, DEFAULT_MAX_BODY).await.unwrap();
    assert_eq!(&body[..], b"name=value1");
    drop(sender.await.unwrap());
}

#[tokio::test]
async fn test_body_satisfied_then_closed_is_clean() {
    let (mut client, mut server) = tokio::io::duplex(64);
    client.write_all(b"abcde").await.unwrap();
    drop(client);

    let body = read_body(&mut server, 5, DEFAULT_MAX_BODY).await.unwrap();
    assert_eq!(&body[..], b"abcde");
}
