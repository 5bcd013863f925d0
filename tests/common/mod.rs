#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: String,
    pub target: String,
    pub body: String,
}

pub struct MockService {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockService {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn targets(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.target.clone())
            .collect()
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Spawn a one-connection-at-a-time HTTP service on an ephemeral port. The
/// handler maps each received request to a `(status, json_body)` pair; every
/// request is recorded for later assertions.
pub async fn spawn(
    handler: impl Fn(&ReceivedRequest) -> (u16, String) + Send + Sync + 'static,
) -> MockService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests: Arc<Mutex<Vec<ReceivedRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let handler: Arc<dyn Fn(&ReceivedRequest) -> (u16, String) + Send + Sync> = Arc::new(handler);

    {
        let requests = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let requests = requests.clone();
                let handler = handler.clone();
                tokio::spawn(async move {
                    let mut data = Vec::new();
                    let mut buf = [0u8; 4096];

                    // Read up to the end of the header block
                    let header_end = loop {
                        match socket.read(&mut buf).await {
                            Ok(0) => return,
                            Ok(n) => {
                                data.extend_from_slice(&buf[..n]);
                                if let Some(pos) = find_subsequence(&data, b"\r\n\r\n") {
                                    break pos + 4;
                                }
                            }
                            Err(_) => return,
                        }
                    };

                    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
                    let content_length = head
                        .lines()
                        .find_map(|line| {
                            let (key, value) = line.split_once(':')?;
                            if key.eq_ignore_ascii_case("content-length") {
                                value.trim().parse::<usize>().ok()
                            } else {
                                None
                            }
                        })
                        .unwrap_or(0);

                    while data.len() < header_end + content_length {
                        match socket.read(&mut buf).await {
                            Ok(0) => break,
                            Ok(n) => data.extend_from_slice(&buf[..n]),
                            Err(_) => return,
                        }
                    }

                    let request_line = head.lines().next().unwrap_or_default();
                    let mut parts = request_line.split_whitespace();
                    let method = parts.next().unwrap_or_default().to_string();
                    let target = parts.next().unwrap_or_default().to_string();
                    let body = String::from_utf8_lossy(&data[header_end..]).to_string();

                    let request = ReceivedRequest {
                        method,
                        target,
                        body,
                    };
                    let (status, response_body) = handler(&request);
                    requests.lock().unwrap().push(request);

                    let response = format!(
                        "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        response_body.len(),
                        response_body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
    }

    MockService {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// A server that accepts connections but never answers; exercises client
/// timeouts.
pub async fn spawn_unresponsive() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                let _socket = socket;
                tokio::time::sleep(std::time::Duration::from_secs(120)).await;
            });
        }
    });

    format!("http://{}", addr)
}

/// A base URL nothing listens on; connections are refused.
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
