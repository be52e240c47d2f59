//! Shared HTTP JSON fetching with uniform failure handling.
//!
//! This module provides the [`JsonFetcher`] struct used by both command
//! handlers. Every request outcome is collapsed into a [`FetchResult`] value:
//! transport errors, non-success statuses and unparseable bodies never raise
//! to the caller, so callers can fan out many requests and inspect each
//! result independently.

use std::time::Duration;

use log::{debug, warn};
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Default timeout applied to every outbound request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Outcome of a single JSON fetch.
///
/// # Shapes
///
/// * Success: `ok == true`, `status` is the 2xx code, `json` holds the body.
/// * Non-success status: `ok == false`, `status` is the code, body not parsed.
/// * Transport error or unparseable body: `ok == false`, `status` and `json`
///   are both `None`.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// Whether the request returned a 2xx status with a parseable JSON body.
    pub ok: bool,
    /// HTTP status code, absent on transport and parse failures.
    pub status: Option<u16>,
    /// Parsed JSON body, present only on success.
    pub json: Option<Value>,
}

impl FetchResult {
    /// A transport-level failure: no status, no body.
    fn transport_failure() -> Self {
        FetchResult {
            ok: false,
            status: None,
            json: None,
        }
    }
}

/// HTTP client wrapper issuing GET requests with a bounded timeout.
///
/// The fetcher is cheap to clone (the underlying `reqwest::Client` is an
/// `Arc` internally) and holds no per-request state.
///
/// # Examples
///
/// ```no_run
/// # use std::time::Duration;
/// # use knightbot::fetch::JsonFetcher;
/// # async fn example() {
/// let fetcher = JsonFetcher::new(Duration::from_secs(10));
/// let result = fetcher.fetch_json("https://api.github.com/repos/rust-lang/rust", None).await;
/// if result.ok {
///     println!("{:?}", result.json);
/// }
/// # }
/// ```
#[derive(Clone)]
pub struct JsonFetcher {
    /// HTTP client with the configured timeout
    client: reqwest::Client,
}

impl JsonFetcher {
    /// Creates a new fetcher whose requests all share the given timeout.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized, like
    /// `reqwest::Client::new`.
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build http client");

        JsonFetcher { client }
    }

    /// Issues a GET request and parses the response body as JSON.
    ///
    /// All failure modes are reported through the returned [`FetchResult`]:
    ///
    /// * transport errors (DNS failure, timeout, connection reset) yield
    ///   `{ok: false, status: None, json: None}`
    /// * non-2xx statuses yield `{ok: false, status: Some(code), json: None}`
    ///   without reading the body
    /// * a 2xx response with an unparseable body is treated as a transport
    ///   error
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL to request
    /// * `headers` - Optional extra headers (API media type, credential)
    pub async fn fetch_json(&self, url: &str, headers: Option<HeaderMap>) -> FetchResult {
        debug!("fetch {}", url);

        let mut request = self.client.get(url);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("transport error for {}: {}", url, e);
                return FetchResult::transport_failure();
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("status {} for {}", status.as_u16(), url);
            return FetchResult {
                ok: false,
                status: Some(status.as_u16()),
                json: None,
            };
        }

        match response.json::<Value>().await {
            Ok(json) => FetchResult {
                ok: true,
                status: Some(status.as_u16()),
                json: Some(json),
            },
            Err(e) => {
                warn!("unparseable body from {}: {}", url, e);
                FetchResult::transport_failure()
            }
        }
    }

    /// Downloads a resource as raw bytes.
    ///
    /// Returns `None` on any failure. Used for the owner avatar image.
    pub async fn fetch_bytes(&self, url: &str) -> Option<Vec<u8>> {
        debug!("fetch bytes {}", url);

        let response = self.client.get(url).send().await.ok()?;
        if !response.status().is_success() {
            debug!("status {} for {}", response.status().as_u16(), url);
            return None;
        }

        response.bytes().await.ok().map(|bytes| bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_json_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/data")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "value"}"#)
            .create_async()
            .await;

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let result = fetcher
            .fetch_json(&format!("{}/data", server.url()), None)
            .await;

        assert!(result.ok);
        assert_eq!(result.status, Some(200));
        assert_eq!(result.json.unwrap()["name"], "value");
    }

    #[tokio::test]
    async fn test_fetch_json_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let result = fetcher
            .fetch_json(&format!("{}/missing", server.url()), None)
            .await;

        assert!(!result.ok);
        assert_eq!(result.status, Some(404));
        assert!(result.json.is_none());
    }

    #[tokio::test]
    async fn test_fetch_json_invalid_body_is_transport_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/broken")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let result = fetcher
            .fetch_json(&format!("{}/broken", server.url()), None)
            .await;

        assert!(!result.ok);
        assert_eq!(result.status, None);
        assert!(result.json.is_none());
    }

    #[tokio::test]
    async fn test_fetch_json_unreachable_host() {
        let fetcher = JsonFetcher::new(Duration::from_secs(1));
        let result = fetcher
            .fetch_json("http://127.0.0.1:1/unreachable", None)
            .await;

        assert!(!result.ok);
        assert_eq!(result.status, None);
        assert!(result.json.is_none());
    }

    #[tokio::test]
    async fn test_fetch_json_sends_headers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/secure")
            .match_header("authorization", "token secret")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let mut headers = HeaderMap::new();
        headers.insert("authorization", "token secret".parse().unwrap());

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let result = fetcher
            .fetch_json(&format!("{}/secure", server.url()), Some(headers))
            .await;

        assert!(result.ok);
    }

    #[tokio::test]
    async fn test_fetch_bytes_success() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/avatar.png")
            .with_status(200)
            .with_body(&[0x89, 0x50, 0x4e, 0x47])
            .create_async()
            .await;

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let bytes = fetcher
            .fetch_bytes(&format!("{}/avatar.png", server.url()))
            .await;

        assert_eq!(bytes, Some(vec![0x89, 0x50, 0x4e, 0x47]));
    }

    #[tokio::test]
    async fn test_fetch_bytes_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/avatar.png")
            .with_status(500)
            .create_async()
            .await;

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let bytes = fetcher
            .fetch_bytes(&format!("{}/avatar.png", server.url()))
            .await;

        assert_eq!(bytes, None);
    }
}
