mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use quill::store::{MemoryStore, PostStore, SharedStore};
use quill::{PostsApi, Server};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

/// Sends one HTTP/1.1 request with `connection: close` and returns the raw
/// response text.
async fn raw_request(addr: SocketAddr, method: &str, path: &str, body: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "{method} {path} HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\
         content-type: application/json\r\ncontent-length: {}\r\n\r\n{body}",
        body.len(),
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn serves_over_tcp_and_stops_on_signal() {
    let store: SharedStore = Arc::new(MemoryStore::named("tcp"));
    store.insert_many(vec![common::new_post(), common::new_post()]).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let app = PostsApi::new(Arc::clone(&store)).router();
    let server = tokio::spawn(
        Server::from_listener(listener).serve_with_shutdown(app, async move {
            let _ = stop_rx.await;
        }),
    );

    let res = raw_request(addr, "GET", "/posts", "").await;
    assert!(res.starts_with("HTTP/1.1 200"), "{res}");
    assert!(res.contains(r#"{"posts":["#));

    let body = serde_json::to_string(&common::create_body(&common::new_post())).unwrap();
    let res = raw_request(addr, "POST", "/posts", &body).await;
    assert!(res.starts_with("HTTP/1.1 201"), "{res}");
    assert_eq!(store.count().await.unwrap(), 3);

    let res = raw_request(addr, "GET", "/healthz", "").await;
    assert!(res.starts_with("HTTP/1.1 200") && res.ends_with("ok"), "{res}");

    stop_tx.send(()).unwrap();
    server.await.unwrap().unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}
