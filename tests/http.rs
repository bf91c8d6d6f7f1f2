//! End-to-end behaviour over a real socket.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use maintenance::config::RETRY_AFTER;
use maintenance::{Error, MESSAGE, Maintenance, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const DATE: &str = "Mon, 02 Jan 2006 15:04:05 GMT";

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<Result<(), Error>>,
}

impl TestServer {
    async fn start(app: Maintenance) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(Server::run(listener, app, async {
            let _ = stopped.await;
        }));
        Self { addr, stop, task }
    }

    async fn shutdown(self) {
        self.stop.send(()).unwrap();
        self.task.await.unwrap().unwrap();
    }
}

struct Reply {
    status: u16,
    headers: HashMap<String, String>,
    body: String,
}

async fn send(addr: SocketAddr, method: &str, path: &str) -> Reply {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nhost: {addr}\r\norigin: https://app.example.com\r\nconnection: close\r\ncontent-length: 0\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    read_reply(&mut stream).await
}

/// Reads exactly one response, leaving the connection open.
async fn read_reply(stream: &mut TcpStream) -> Reply {
    let mut raw = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        if let Some(reply) = parse_reply(&raw) {
            return reply;
        }
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed mid-response");
        raw.extend_from_slice(&chunk[..n]);
    }
}

fn parse_reply(raw: &[u8]) -> Option<Reply> {
    let raw = std::str::from_utf8(raw).ok()?;
    let (head, body) = raw.split_once("\r\n\r\n")?;
    let mut lines = head.split("\r\n");
    let status = lines.next()?.split(' ').nth(1)?.parse().ok()?;
    let headers: HashMap<String, String> = lines
        .filter_map(|line| {
            let (name, value) = line.split_once(':')?;
            Some((name.trim().to_ascii_lowercase(), value.trim().to_owned()))
        })
        .collect();

    let len = headers.get("content-length").map_or(0, |v| v.parse().unwrap());
    if body.len() < len {
        return None;
    }
    Some(Reply { status, headers, body: body[..len].to_owned() })
}

fn app(retry_after: Option<&str>) -> Maintenance {
    let mut config = HashMap::new();
    if let Some(value) = retry_after {
        config.insert(RETRY_AFTER.to_owned(), value.to_owned());
    }
    Maintenance::new(config)
}

#[tokio::test]
async fn get_advertises_configured_retry_after() {
    let server = TestServer::start(app(Some(DATE))).await;

    let reply = send(server.addr, "GET", "/").await;
    assert_eq!(reply.status, 503);
    assert_eq!(reply.headers.get("retry-after").map(String::as_str), Some(DATE));
    assert_eq!(reply.body, MESSAGE);

    server.shutdown().await;
}

#[tokio::test]
async fn get_without_config_has_no_retry_after() {
    let server = TestServer::start(app(None)).await;

    let reply = send(server.addr, "GET", "/some/deep/path?q=1").await;
    assert_eq!(reply.status, 503);
    assert!(!reply.headers.contains_key("retry-after"));
    assert_eq!(reply.body, MESSAGE);

    server.shutdown().await;
}

#[tokio::test]
async fn invalid_config_is_treated_as_unset() {
    let server = TestServer::start(app(Some("2006-01-02T15:04:05Z"))).await;

    let reply = send(server.addr, "POST", "/orders").await;
    assert_eq!(reply.status, 503);
    assert!(!reply.headers.contains_key("retry-after"));

    server.shutdown().await;
}

#[tokio::test]
async fn options_is_a_preflight() {
    let server = TestServer::start(app(Some(DATE))).await;

    let reply = send(server.addr, "OPTIONS", "/").await;
    assert_eq!(reply.status, 200);
    assert!(!reply.headers.contains_key("retry-after"));
    assert!(!reply.headers.contains_key("access-control-expose-headers"));
    assert_eq!(
        reply.headers.get("access-control-allow-origin").map(String::as_str),
        Some("*")
    );

    server.shutdown().await;
}

#[tokio::test]
async fn get_carries_cors_headers() {
    let server = TestServer::start(app(None)).await;

    let reply = send(server.addr, "GET", "/").await;
    let header = |name: &str| reply.headers.get(name).map(String::as_str);
    assert_eq!(header("access-control-allow-headers"), Some("*"));
    assert_eq!(header("access-control-allow-origin"), Some("*"));
    assert_eq!(
        header("access-control-allow-methods"),
        Some("GET, POST, PUT, DELETE, OPTIONS")
    );
    assert_eq!(header("access-control-expose-headers"), Some("Retry-After"));

    server.shutdown().await;
}

#[tokio::test]
async fn bare_variant_sends_no_cors_headers() {
    let server = TestServer::start(app(Some(DATE)).cors(false)).await;

    let reply = send(server.addr, "OPTIONS", "/").await;
    assert_eq!(reply.status, 503);
    assert_eq!(reply.headers.get("retry-after").map(String::as_str), Some(DATE));
    assert!(reply.headers.keys().all(|name| !name.starts_with("access-control-")));

    server.shutdown().await;
}

#[tokio::test]
async fn serves_many_connections_then_stops() {
    let server = TestServer::start(app(None)).await;

    let replies = concurrent_statuses(server.addr, 8).await;
    assert!(replies.iter().all(|status| *status == 503));

    server.shutdown().await;
}

async fn concurrent_statuses(addr: SocketAddr, n: usize) -> Vec<u16> {
    let mut set = tokio::task::JoinSet::new();
    for i in 0..n {
        set.spawn(async move { send(addr, "GET", &format!("/item/{i}")).await.status });
    }
    let mut statuses = Vec::with_capacity(n);
    while let Some(status) = set.join_next().await {
        statuses.push(status.unwrap());
    }
    statuses
}

#[tokio::test]
async fn shutdown_closes_idle_keep_alive_connections() {
    let server = TestServer::start(app(Some(DATE))).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    let request = format!("GET / HTTP/1.1\r\nhost: {}\r\n\r\n", server.addr);
    stream.write_all(request.as_bytes()).await.unwrap();
    let reply = read_reply(&mut stream).await;
    assert_eq!(reply.status, 503);
    assert_eq!(reply.body, MESSAGE);

    tokio::time::timeout(Duration::from_secs(3), server.shutdown())
        .await
        .expect("server kept running with an idle keep-alive client");

    let mut rest = Vec::new();
    assert_eq!(stream.read_to_end(&mut rest).await.unwrap(), 0);
}

#[tokio::test]
async fn keep_alive_connection_serves_several_requests() {
    let server = TestServer::start(app(None)).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    for method in ["GET", "OPTIONS", "DELETE"] {
        let request = format!("{method} /a/b HTTP/1.1\r\nhost: {}\r\n\r\n", server.addr);
        stream.write_all(request.as_bytes()).await.unwrap();
        let reply = read_reply(&mut stream).await;
        let expected = if method == "OPTIONS" { 200 } else { 503 };
        assert_eq!(reply.status, expected, "{method}");
    }

    server.shutdown().await;
}
