//! Test utilities and fixtures for simplecast-source tests.
//!
//! This module provides sample API payloads and helpers around a
//! `wiremock::MockServer` so clients can be exercised without the real API.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MockServer, PODCAST_JSON, mount_json, received, test_client};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let server = MockServer::start().await;
//!     mount_json(&server, "/podcasts/pod-1", 200, PODCAST_JSON).await;
//!     let client = test_client(&server.uri());
//!     let podcast = client.fetch_podcast().await.unwrap();
//!     assert_eq!(received(&server).await.len(), 1);
//! }
//! ```

use wiremock::matchers::{method, path};
use wiremock::{Mock, Request, ResponseTemplate};

use crate::simplecast::{ClientOptions, SimplecastClient};

pub use wiremock::MockServer;

/// `GET /podcasts/{id}` sample, including fields outside the allow-list
pub const PODCAST_JSON: &str = r##"{
    "id": "6d2ef9d5-0d83-4bd6-9ad3-6c3e3d7a2b11",
    "href": "https://api.simplecast.com/podcasts/6d2ef9d5-0d83-4bd6-9ad3-6c3e3d7a2b11",
    "account_id": "acct-9",
    "status": "published",
    "title": "Rust in Production",
    "subtitle": "Stories from teams shipping Rust",
    "description": "Interviews with engineers running Rust in production.",
    "copyright": "2024 Example Media",
    "created_at": "2023-01-15T12:00:00-05:00",
    "published_at": "2023-02-01T08:00:00-05:00",
    "feed_url": "https://feeds.simplecast.com/abc123",
    "image_url": "https://image.simplecastcdn.com/images/pod.jpg",
    "image_path": "images/pod.jpg",
    "logo_image_url": "https://image.simplecastcdn.com/images/logo.png",
    "language": "en-us",
    "site": { "url": "https://rust.example.com", "theme_color": "#ce422b" },
    "owner": { "name": "Ferris", "email": "ferris@example.com" },
    "time_zone": "America/New_York",
    "keywords": {
        "href": "https://api.simplecast.com/podcasts/6d2ef9d5/keywords",
        "collection": [
            { "value": "rust", "href": "https://api.simplecast.com/keywords/1" },
            { "value": "systems programming", "href": "https://api.simplecast.com/keywords/2" }
        ]
    },
    "episodes": { "href": "https://api.simplecast.com/podcasts/6d2ef9d5/episodes", "count": 2 }
}"##;

/// `GET /podcasts/{id}/episodes` sample, newest first
pub const EPISODES_JSON: &str = r#"{
    "href": "https://api.simplecast.com/podcasts/pod-1/episodes?limit=99",
    "pages": { "total": 1, "limit": 99, "current": 1 },
    "collection": [
        {
            "id": "ep-2",
            "title": "Second Episode",
            "description": "Async all the way down.",
            "published_at": "2024-02-01T10:00:00Z",
            "status": "published",
            "image_url": "https://image.simplecastcdn.com/images/ep-2.jpg",
            "enclosure_url": "https://cdn.example.com/ep-2.mp3",
            "number": 2,
            "season": { "href": "https://api.simplecast.com/seasons/s1", "number": 1 },
            "duration": 1800,
            "analytics": { "total_downloads": 1200 }
        },
        {
            "id": "ep-1",
            "title": "Pilot",
            "published_at": "2024-01-01T10:00:00Z",
            "status": "published",
            "image_url": null,
            "enclosure_url": "https://cdn.example.com/ep-1.mp3",
            "number": 1,
            "podcast": { "id": "pod-1", "title": "Rust in Production" },
            "duration": 1200
        }
    ]
}"#;

/// `GET /podcasts/{id}/seasons` sample
pub const SEASONS_JSON: &str = r#"{
    "collection": [
        { "id": "season-1", "number": 1, "episodes": { "count": 2 } }
    ]
}"#;

/// `GET /episodes/{id}` sample
pub const EPISODE_JSON: &str = r#"{
    "id": "ep-2",
    "title": "Second Episode",
    "enclosure_url": "https://cdn.example.com/ep-2.mp3",
    "season": { "href": "https://api.simplecast.com/seasons/s1", "number": 1 },
    "podcast": { "id": "pod-1", "title": "Rust in Production" },
    "audio_file": { "size": 2048, "content_type": "audio/mpeg" }
}"#;

/// Client bound to `pod-1` with token `test-token`, talking to `base_url`
pub fn test_client(base_url: &str) -> SimplecastClient {
    SimplecastClient::with_options(
        "test-token",
        "pod-1",
        ClientOptions {
            base_url: base_url.to_string(),
            use_system_proxy: false,
            ..Default::default()
        },
    )
    .expect("Failed to build test client")
}

/// A plain reqwest client that ignores proxy settings
pub fn test_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build HTTP client")
}

/// Base URL of a port nothing is listening on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    drop(listener);
    format!("http://{}", addr)
}

/// Answer `GET url_path` (any query) with a JSON body
pub async fn mount_json(server: &MockServer, url_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(
            ResponseTemplate::new(status).set_body_raw(body.as_bytes().to_vec(), "application/json"),
        )
        .mount(server)
        .await;
}

/// Answer `GET url_path` with arbitrary bytes
pub async fn mount_bytes(server: &MockServer, url_path: &str, content_type: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type))
        .mount(server)
        .await;
}

/// Requests the server has seen, in arrival order
pub async fn received(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap_or_default()
}

/// Path plus query string of a received request
pub fn target(request: &Request) -> String {
    match request.url.query() {
        Some(query) => format!("{}?{}", request.url.path(), query),
        None => request.url.path().to_string(),
    }
}

/// Header value of a received request, if present and valid UTF-8
pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_valid_json() {
        for fixture in [PODCAST_JSON, EPISODES_JSON, EPISODE_JSON, SEASONS_JSON] {
            serde_json::from_str::<serde_json::Value>(fixture).expect("fixture should parse");
        }
    }

    #[tokio::test]
    async fn test_mounted_route_is_recorded() {
        let server = MockServer::start().await;
        mount_json(&server, "/ping", 200, "{}").await;

        let response = test_http_client()
            .get(format!("{}/ping?x=1", server.uri()))
            .header("X-Test", "yes")
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let requests = received(&server).await;
        assert_eq!(requests.len(), 1);
        assert_eq!(target(&requests[0]), "/ping?x=1");
        assert_eq!(header(&requests[0], "x-test"), Some("yes"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let server = MockServer::start().await;
        let response = test_http_client()
            .get(format!("{}/missing", server.uri()))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }
}
