use axum::http::{header, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral local port and return its `/chat` URL.
pub async fn spawn_stub_backend(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/chat")
}

/// Backend that answers every query with a fixed status and raw body.
pub fn canned_backend(status: StatusCode, body: &str) -> Router {
    let body = body.to_string();
    Router::new().route(
        "/chat",
        post(move || {
            let body = body.clone();
            async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }
        }),
    )
}

/// Backend that replies `{"response": "backend saw: <query>"}`.
pub fn echoing_backend() -> Router {
    Router::new().route(
        "/chat",
        post(|Json(body): Json<Value>| async move {
            let query = body
                .get("query")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            Json(json!({ "response": format!("backend saw: {query}") }))
        }),
    )
}

/// A URL on a port that was bound and released, so nothing is listening.
pub async fn unreachable_backend_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);
    format!("http://{addr}/chat")
}
