//! End-to-end forwarding tests against mock backends.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use url::Url;

use http_gateway::gateway::{ForwardError, GatewayForwarder, OutboundBody, OutboundRequest, RawFile};
use http_gateway::transport::{TcpTransport, Transport, TransportError};

mod common;

fn forwarder(addr: SocketAddr) -> GatewayForwarder {
    let base_url = Url::parse(&format!("http://{addr}")).unwrap();
    let transport: Arc<dyn Transport> = Arc::new(TcpTransport::new());
    GatewayForwarder::new(base_url, transport)
        .with_cookie_jar()
        .request_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn field_body_forwards_as_urlencoded_post() {
    let addr: SocketAddr = "127.0.0.1:29101".parse().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    common::start_capture_backend(addr, "HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok", tx).await;

    let request = OutboundRequest {
        path: "search".to_string(),
        body: OutboundBody::Fields(vec![("q".to_string(), "1".to_string())]),
        ..OutboundRequest::default()
    };
    let parsed = forwarder(addr).forward(request).await.unwrap();

    assert_eq!(parsed.status.code, "200");
    assert_eq!(parsed.body, b"ok");

    let raw = rx.recv().await.unwrap();
    let text = String::from_utf8(raw).unwrap();
    assert!(text.starts_with("POST /search HTTP/1.0\r\n"), "{text}");
    assert!(!text.to_ascii_lowercase().contains("content-type"), "{text}");
    assert!(text.contains("Content-Length: 3\r\n"), "{text}");
    assert!(text.ends_with("\r\n\r\nq=1"), "{text}");
}

#[tokio::test]
async fn bodyless_request_forwards_as_get() {
    let addr: SocketAddr = "127.0.0.1:29102".parse().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    common::start_capture_backend(addr, "HTTP/1.1 200 OK\r\n\r\n", tx).await;

    forwarder(addr)
        .forward(OutboundRequest::get("ping"))
        .await
        .unwrap();

    let text = String::from_utf8(rx.recv().await.unwrap()).unwrap();
    assert!(text.starts_with("GET /ping HTTP/1.0\r\n"), "{text}");
    assert!(!text.to_ascii_lowercase().contains("content-length"), "{text}");
}

#[tokio::test]
async fn files_forward_as_multipart_with_matching_boundary() {
    let addr: SocketAddr = "127.0.0.1:29103".parse().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    common::start_capture_backend(addr, "HTTP/1.1 200 OK\r\n\r\n", tx).await;

    let request = OutboundRequest {
        path: "upload".to_string(),
        body: OutboundBody::Fields(vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]),
        content_type: None,
        files: vec![RawFile::new("f", "x.txt", b"hi".to_vec())],
    };
    forwarder(addr).forward(request).await.unwrap();

    let text = String::from_utf8(rx.recv().await.unwrap()).unwrap();
    let content_type_line = text
        .lines()
        .find(|line| line.starts_with("Content-Type: "))
        .expect("content type header");
    let boundary = content_type_line
        .strip_prefix("Content-Type: multipart/form-data; boundary=")
        .expect("multipart content type");

    assert!(text.contains(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"a\"\r\n\r\n1\r\n"
    )));
    assert!(text.contains(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"b\"\r\n\r\n2\r\n"
    )));
    assert!(text.contains(&format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"f\"; filename=\"x.txt\"\r\n\r\nhi\r\n"
    )));
    assert!(text.ends_with(&format!("--{boundary}--\r\n")), "{text}");
}

#[tokio::test]
async fn set_cookie_headers_fill_the_jar() {
    let addr: SocketAddr = "127.0.0.1:29104".parse().unwrap();
    common::start_mock_backend(
        addr,
        "HTTP/1.1 200 OK\r\nSet-Cookie: a=1, b=2; Path=/\r\nContent-Length: 0\r\n\r\n",
    )
    .await;

    let forwarder = forwarder(addr);
    forwarder
        .forward(OutboundRequest::get("login"))
        .await
        .unwrap();

    let jar = forwarder.cookie_jar().unwrap();
    assert_eq!(jar.get("a"), Some("1".to_string()));
    assert_eq!(jar.get("b"), Some("2".to_string()));
    assert_eq!(jar.len(), 2);
}

#[tokio::test]
async fn later_responses_overwrite_cookies() {
    let addr: SocketAddr = "127.0.0.1:29105".parse().unwrap();
    common::start_sequenced_backend(
        addr,
        vec![
            "HTTP/1.1 200 OK\r\nSet-Cookie: session=old\r\nContent-Length: 0\r\n\r\n",
            "HTTP/1.1 200 OK\r\nSet-Cookie: session=new\r\nContent-Length: 0\r\n\r\n",
        ],
    )
    .await;

    let forwarder = forwarder(addr);
    forwarder
        .forward(OutboundRequest::get("first"))
        .await
        .unwrap();
    forwarder
        .forward(OutboundRequest::get("second"))
        .await
        .unwrap();

    let jar = forwarder.cookie_jar().unwrap();
    assert_eq!(jar.get("session"), Some("new".to_string()));
    assert_eq!(jar.len(), 1);
}

#[tokio::test]
async fn refused_connection_surfaces_as_transport_error() {
    // Nothing listens here.
    let addr: SocketAddr = "127.0.0.1:29106".parse().unwrap();

    let forwarder = forwarder(addr);
    let err = forwarder
        .forward(OutboundRequest::get("missing"))
        .await
        .unwrap_err();

    match err {
        ForwardError::Transport { path, source } => {
            assert_eq!(path, "missing");
            assert!(matches!(source, TransportError::Connect(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(forwarder.cookie_jar().unwrap().is_empty());
}

#[tokio::test]
async fn stalled_backend_hits_the_deadline() {
    let addr: SocketAddr = "127.0.0.1:29107".parse().unwrap();
    common::start_stalling_backend(addr).await;

    let forwarder = forwarder(addr).request_timeout(Duration::from_millis(200));
    let err = forwarder
        .forward(OutboundRequest::get("slow"))
        .await
        .unwrap_err();

    match err {
        ForwardError::Transport { source, .. } => {
            assert!(matches!(source, TransportError::Timeout(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
