//! Shared mock servers for integration tests.

use std::net::SocketAddr;
use std::sync::atomic::AtomicUsize;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Read a request head and return the request-target (path + query).
async fn read_request_target(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

async fn write_response(socket: &mut TcpStream, status_line: &str, extra_headers: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n{}",
        status_line,
        body.len(),
        extra_headers,
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a mock rendering origin that records every request target and
/// answers 200 with a cacheable-looking header (the edge must overwrite it).
pub async fn start_mock_origin() -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let recorder = recorder.clone();
                    tokio::spawn(async move {
                        if let Some(target) = read_request_target(&mut socket).await {
                            recorder.lock().unwrap().push(target);
                            write_response(
                                &mut socket,
                                "200 OK",
                                "Cache-Control: public, max-age=3600\r\n",
                                "origin",
                            )
                            .await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, seen)
}

/// Start a mock content API speaking the REST lookup dialect:
/// `GET /rest/v1/<table>?select=slug&slug=eq.<slug>&limit=1` answered with
/// a JSON array. `rows` holds (table, slug) pairs that exist.
pub async fn start_content_api(
    rows: Vec<(&'static str, &'static str)>,
) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = lookups.clone();
    let rows = Arc::new(rows);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let counter = counter.clone();
                    let rows = rows.clone();
                    tokio::spawn(async move {
                        let Some(target) = read_request_target(&mut socket).await else {
                            return;
                        };
                        counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);

                        let (path, query) = match target.split_once('?') {
                            Some((p, q)) => (p, q),
                            None => (target.as_str(), ""),
                        };
                        let table = path.strip_prefix("/rest/v1/").unwrap_or_default();
                        let slug = query
                            .split('&')
                            .find_map(|pair| pair.strip_prefix("slug=eq."))
                            .unwrap_or_default();

                        let found = rows.iter().any(|(t, s)| *t == table && *s == slug);
                        let body = if found {
                            format!("[{{\"slug\":\"{slug}\"}}]")
                        } else {
                            "[]".to_string()
                        };
                        write_response(
                            &mut socket,
                            "200 OK",
                            "Content-Type: application/json\r\n",
                            &body,
                        )
                        .await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, lookups)
}

/// Start a content API that fails every lookup with a 500.
#[allow(dead_code)]
pub async fn start_failing_content_api() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        if read_request_target(&mut socket).await.is_some() {
                            write_response(
                                &mut socket,
                                "500 Internal Server Error",
                                "",
                                "backend down",
                            )
                            .await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
