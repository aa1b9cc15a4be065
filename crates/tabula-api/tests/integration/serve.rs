//! Serving over a real TCP listener.

use tabula_api::Server;
use tabula_core::TabulaConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

#[tokio::test]
async fn test_serve_answers_and_shuts_down() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut config = TabulaConfig::default();
    config.store.path = dir.path().join("rows.csv");

    let server = Server::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let task = tokio::spawn(server.serve_on(listener, async move {
        let _ = stop_rx.await;
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("\"healthy\""));

    stop_tx.send(()).unwrap();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_server_rejects_invalid_config() {
    let mut config = TabulaConfig::default();
    config.form.required = vec!["Farbe".into()];
    let err = Server::new(config).unwrap_err();
    assert!(err.to_string().contains("Farbe"));
}
