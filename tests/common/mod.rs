//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use demoapp::{HttpServer, Shutdown};

/// Canned answer served by a mock backend.
#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: &'static str,
    /// `Content-Length` to announce; defaults to the real body length.
    pub declared_length: Option<usize>,
}

impl MockResponse {
    pub fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body,
            declared_length: None,
        }
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Announce more bytes than are sent, then hang up mid-body.
    pub fn truncated(mut self, declared_length: usize) -> Self {
        self.declared_length = Some(declared_length);
        self
    }

    fn to_raw(&self, keep_alive: bool) -> String {
        let reason = match self.status {
            200 => "OK",
            302 => "Found",
            307 => "Temporary Redirect",
            404 => "Not Found",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Unknown",
        };
        let mut raw = format!("HTTP/1.1 {} {}\r\n", self.status, reason);
        for (name, value) in &self.headers {
            raw.push_str(&format!("{name}: {value}\r\n"));
        }
        raw.push_str(&format!(
            "Content-Length: {}\r\n",
            self.declared_length.unwrap_or(self.body.len())
        ));
        if !keep_alive {
            raw.push_str("Connection: close\r\n");
        }
        raw.push_str("\r\n");
        raw.push_str(self.body);
        raw
    }
}

/// A running mock upstream.
pub struct MockBackend {
    pub addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
}

impl MockBackend {
    /// TCP connections accepted so far.
    pub fn connections(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }
}

/// Start a mock upstream that answers every request with `response`.
pub async fn start_mock_backend(response: MockResponse) -> SocketAddr {
    start_routed_backend(false, move |_| response.clone()).await.addr
}

/// Start a mock upstream choosing its answer from the request path.
///
/// With `keep_alive` the backend never closes a connection itself and keeps
/// serving requests on it until the client hangs up.
pub async fn start_routed_backend<F>(keep_alive: bool, route: F) -> MockBackend
where
    F: Fn(&str) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let route = Arc::new(route);

    let counter = accepted.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let route = route.clone();
                    tokio::spawn(serve_connection(socket, keep_alive, route));
                }
                Err(_) => break,
            }
        }
    });

    MockBackend { addr, accepted }
}

async fn serve_connection<F>(mut socket: TcpStream, keep_alive: bool, route: Arc<F>)
where
    F: Fn(&str) -> MockResponse + Send + Sync + 'static,
{
    let mut buf = [0u8; 4096];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        let request = String::from_utf8_lossy(&buf[..n]);
        let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

        let response = route(&path);
        let truncated = response.declared_length.is_some();
        if socket
            .write_all(response.to_raw(keep_alive).as_bytes())
            .await
            .is_err()
        {
            return;
        }

        if !keep_alive || truncated {
            let _ = socket.shutdown().await;
            tokio::time::sleep(Duration::from_millis(10)).await;
            return;
        }
    }
}

/// Bind `server` on a loopback port and run it until `shutdown` triggers.
pub async fn spawn_server(server: HttpServer, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let receiver = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    addr
}

/// An address with nothing listening on it.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
