use std::time::Duration;

use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crpt_client::client::{ClientConfig, HttpTransport, Transport, TransportError};

/// Serves a single canned HTTP response and hands back the raw request
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!(
        "http://{}/api/v3/lk/documents/create",
        listener.local_addr().unwrap()
    );
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let response = format!(
            concat!(
                "HTTP/1.1 {}\r\n",
                "Content-Type: application/json\r\n",
                "Content-Length: {}\r\n",
                "Connection: close\r\n\r\n{}"
            ),
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = tx.send(request);
    });

    (endpoint, rx)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = socket.read(&mut chunk).await.unwrap();
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).to_string()
}

fn transport() -> HttpTransport {
    HttpTransport::new(&ClientConfig {
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn posts_json_and_returns_body() {
    let (endpoint, request) = serve_once("200 OK", r#"{"value":"ok"}"#).await;
    let payload = r#"{"doc_id":"doc-1"}"#.to_string();

    let body = transport().post(&endpoint, payload.clone()).await.unwrap();
    assert_eq!(body, r#"{"value":"ok"}"#);

    let request = request.await.unwrap();
    assert!(request.starts_with("POST /api/v3/lk/documents/create HTTP/1.1"));
    assert!(request
        .to_ascii_lowercase()
        .contains("content-type: application/json"));
    assert!(request.ends_with(&payload));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (endpoint, _request) = serve_once("500 Internal Server Error", "boom").await;

    let err = transport()
        .post(&endpoint, "{}".to_string())
        .await
        .unwrap_err();

    match err {
        TransportError::Status { status, body, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/", listener.local_addr().unwrap());
    drop(listener);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        transport().post(&endpoint, "{}".to_string()),
    )
    .await
    .unwrap();

    assert!(matches!(result, Err(TransportError::Request { .. })));
}
