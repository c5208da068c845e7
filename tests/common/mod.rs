//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use filter_xref_proxy::config::ProxyConfig;
use filter_xref_proxy::{HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// What a scripted upstream answers with.
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub delay: Duration,
    pub location: Option<String>,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self::bytes(status, "application/json", body.as_bytes().to_vec())
    }

    pub fn bytes(status: u16, content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: Some(content_type),
            body,
            delay: Duration::ZERO,
            location: None,
        }
    }

    /// A `302 Found` pointing at `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            content_type: None,
            body: Vec::new(),
            delay: Duration::ZERO,
            location: Some(location.into()),
        }
    }

    pub fn without_content_type(mut self) -> Self {
        self.content_type = None;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A raw-TCP upstream that records each request head it receives.
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Request heads (request line + headers), header names lower-cased.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request target (path + query) of the `n`th request.
    pub fn target(&self, n: usize) -> String {
        let head = &self.requests()[n];
        head.lines()
            .next()
            .and_then(|line| line.split(' ').nth(1))
            .unwrap()
            .to_string()
    }

    /// Decoded query pairs of the `n`th request.
    pub fn query_pairs(&self, n: usize) -> Vec<(String, String)> {
        let url = url::Url::parse(&format!("http://mock{}", self.target(n))).unwrap();
        url.query_pairs().into_owned().collect()
    }

    pub fn header(&self, n: usize, name: &str) -> Option<String> {
        let prefix = format!("{}:", name.to_ascii_lowercase());
        self.requests()[n]
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()).map(|v| v.trim().to_string()))
    }
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        302 => "302 Found",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Start a scripted upstream on an ephemeral port.
pub async fn start_upstream(reply: Reply) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let reply = reply.clone();
            let recorded = recorded.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 4096];
                loop {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => {
                            buf.extend_from_slice(&chunk[..n]);
                            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                                break;
                            }
                        }
                    }
                }

                let head = String::from_utf8_lossy(&buf);
                let head = head.split("\r\n\r\n").next().unwrap_or_default();
                let normalized = head
                    .lines()
                    .enumerate()
                    .map(|(i, line)| match (i, line.split_once(':')) {
                        (0, _) | (_, None) => line.to_string(),
                        (_, Some((name, value))) => {
                            format!("{}:{}", name.to_ascii_lowercase(), value)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                recorded.lock().unwrap().push(normalized);

                tokio::time::sleep(reply.delay).await;

                let mut response = format!("HTTP/1.1 {}\r\n", status_text(reply.status));
                if let Some(location) = &reply.location {
                    response.push_str(&format!("Location: {}\r\n", location));
                }
                if let Some(ct) = reply.content_type {
                    response.push_str(&format!("Content-Type: {}\r\n", ct));
                }
                response.push_str(&format!(
                    "Content-Length: {}\r\nConnection: close\r\n\r\n",
                    reply.body.len()
                ));
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.write_all(&reply.body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    MockUpstream { addr, requests }
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Defaults with both vendors pointed at `mann` / `wix` and images allowed from 127.0.0.1.
pub fn test_config(mann: SocketAddr, wix: SocketAddr) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.vendors.mann.endpoint = format!("http://{}/api/graphql/catalog-prod", mann);
    config.vendors.wix.endpoint = format!("http://{}/api/graphql/catalog-prod", wix);
    config.images.allowed_hosts = vec!["127.0.0.1".into()];
    config.timeouts.upstream_ms = 2_000;
    config
}

/// Serve `config` on an ephemeral port. Trigger the returned `Shutdown` to stop.
pub async fn spawn_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
