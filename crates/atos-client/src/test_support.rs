//! Local HTTP responders and fakes shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use atos_core::AtoPayload;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::form::AtosApi;
use crate::http::{AtosClient, ClientError};

/// Client that bypasses any proxy configured in the environment.
pub fn local_client(base_url: String) -> AtosClient {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    AtosClient::with_client(base_url, client)
}

/// Accept one connection, answer it with `status` and `body`, and hand back
/// the raw request text.
pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let request = read_request(&mut sock).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(response.as_bytes()).await.unwrap();
        let _ = sock.shutdown().await;
        request
    });
    (format!("http://{addr}"), handle)
}

/// A base URL on a port nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(sock: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = sock.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8(buf).unwrap()
}

/// Scripted reply of a [`FakeApi`].
#[derive(Clone)]
pub enum Reply {
    Created(Value),
    Rejected(u16, Option<&'static str>),
    BadJson,
}

/// In-memory [`AtosApi`] that records every payload it receives.
pub struct FakeApi {
    reply: Reply,
    gate: Option<Arc<Notify>>,
    pub bodies: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            gate: None,
            bodies: Mutex::new(Vec::new()),
        }
    }

    /// Hold every call until `gate` is notified.
    pub fn gated(reply: Reply, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(reply)
        }
    }

    pub fn calls(&self) -> usize {
        self.bodies.lock().unwrap().len()
    }
}

#[async_trait]
impl AtosApi for FakeApi {
    async fn create_ato(&self, payload: &AtoPayload) -> Result<Value, ClientError> {
        self.bodies
            .lock()
            .unwrap()
            .push(payload.to_json().unwrap());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.reply {
            Reply::Created(body) => Ok(body.clone()),
            Reply::Rejected(status, message) => Err(ClientError::Server {
                status: *status,
                message: message.map(str::to_string),
            }),
            Reply::BadJson => Err(serde_json::from_str::<Value>("<html>")
                .unwrap_err()
                .into()),
        }
    }
}
