use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::json;
use tokio::net::TcpListener;

/// Stands in for the generative-language api, every request gets the same reply.
pub struct FakeWordSource {
    pub base_url: String,
}

struct Reply {
    status: StatusCode,
    body: String,
    delay: Duration,
}

impl FakeWordSource {
    pub async fn spawn(status: StatusCode, body: String, delay: Duration) -> FakeWordSource {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind the fake word source.");
        let address = listener.local_addr().unwrap();
        let router = Router::new().fallback(reply).with_state(Arc::new(Reply {
            status,
            body,
            delay,
        }));
        let _ = tokio::spawn(async move { axum::serve(listener, router).await });

        FakeWordSource {
            base_url: format!("http://{address}"),
        }
    }

    pub async fn answering_words(words: &[&str]) -> FakeWordSource {
        FakeWordSource::spawn(
            StatusCode::OK,
            FakeWordSource::words_body(words),
            Duration::ZERO,
        )
        .await
    }

    pub fn words_body(words: &[&str]) -> String {
        json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": json!({ "words": words }).to_string() }]
                }
            }]
        })
        .to_string()
    }
}

async fn reply(State(reply): State<Arc<Reply>>, headers: HeaderMap) -> Response {
    tokio::time::sleep(reply.delay).await;
    if !headers.contains_key("x-goog-api-key") {
        return (StatusCode::UNAUTHORIZED, "missing api key").into_response();
    }
    (reply.status, reply.body.clone()).into_response()
}
