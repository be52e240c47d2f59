//! HTTP client for the code-hosting REST API.
//!
//! This module provides the [`GithubRequester`] struct, a thin endpoint
//! catalogue over the shared [`JsonFetcher`]. Every method returns a
//! [`FetchResult`] by value; failures are data, not errors, so the report
//! composition can inspect each endpoint independently.

use log::{debug, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};

use crate::fetch::{FetchResult, JsonFetcher};

/// User agent sent with every API request.
const API_USER_AGENT: &str = "KnightBot-GitHub-Info";

/// Media type requested from the API.
const API_ACCEPT: &str = "application/vnd.github+json";

/// Results of the eight auxiliary fetches behind the repository report.
///
/// Each field settles independently; a failed fetch only drops its own
/// report section.
#[derive(Debug, Clone, Default)]
pub struct RepoExtras {
    /// Latest commit (`/commits?per_page=1`)
    pub commits: FetchResult,
    /// Language byte shares (`/languages`)
    pub languages: FetchResult,
    /// Open pull requests (`/pulls?state=open&per_page=100`)
    pub pulls: FetchResult,
    /// Latest release (`/releases/latest`)
    pub release: FetchResult,
    /// Top-level directory entries (`/contents`)
    pub contents: FetchResult,
    /// Tags (`/tags?per_page=1`)
    pub tags: FetchResult,
    /// Top contributors (`/contributors?per_page=3`)
    pub contributors: FetchResult,
    /// Full repository record, fetched again for its topics
    pub repo_full: FetchResult,
}

/// HTTP client for requesting repository data from the code-hosting API.
///
/// # Examples
///
/// ```no_run
/// # use std::time::Duration;
/// # use knightbot::fetch::JsonFetcher;
/// # use knightbot::github::GithubRequester;
/// # async fn example() {
/// let fetcher = JsonFetcher::new(Duration::from_secs(10));
/// let requester = GithubRequester::new("https://api.github.com", None, fetcher);
/// let repo = requester.get_repo("rust-lang/rust").await;
/// println!("ok: {}", repo.ok);
/// # }
/// ```
pub struct GithubRequester {
    /// Base URL of the REST API
    api_url: String,
    /// Headers sent with every API request
    headers: HeaderMap,
    /// Shared JSON fetcher
    fetcher: JsonFetcher,
}

impl GithubRequester {
    /// Creates a new [`GithubRequester`].
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the REST API, without a trailing slash
    /// * `token` - Optional API credential, sent as `Authorization: token <t>`
    /// * `fetcher` - The shared JSON fetcher
    pub fn new(api_url: &str, token: Option<&str>, fetcher: JsonFetcher) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(API_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(API_USER_AGENT));
        if let Some(token) = token {
            match HeaderValue::from_str(&format!("token {}", token)) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => warn!("api token contains invalid header characters, ignoring"),
            }
        }

        GithubRequester {
            api_url: api_url.trim_end_matches('/').to_owned(),
            headers,
            fetcher,
        }
    }

    /// Fetches an API path relative to the base URL.
    async fn get(&self, path: &str) -> FetchResult {
        let url = format!("{}{}", self.api_url, path);
        self.fetcher.fetch_json(&url, Some(self.headers.clone())).await
    }

    /// Requests `/repos/{repo}`, the primary repository record.
    pub async fn get_repo(&self, repo: &str) -> FetchResult {
        info!("request repository {}", repo);
        self.get(&format!("/repos/{}", repo)).await
    }

    /// Issues the eight auxiliary fetches concurrently.
    ///
    /// The call suspends until all eight have settled; a failed fetch
    /// surfaces as a not-ok [`FetchResult`] in the corresponding field and
    /// never aborts the others.
    ///
    /// # Arguments
    ///
    /// * `repo` - `owner/name` identifier, preferably the API-reported full
    ///   name of the primary record
    pub async fn fetch_extras(&self, repo: &str) -> RepoExtras {
        info!("request auxiliary data for {}", repo);

        let commits_path = format!("/repos/{}/commits?per_page=1", repo);
        let languages_path = format!("/repos/{}/languages", repo);
        let pulls_path = format!("/repos/{}/pulls?state=open&per_page=100", repo);
        let release_path = format!("/repos/{}/releases/latest", repo);
        let contents_path = format!("/repos/{}/contents", repo);
        let tags_path = format!("/repos/{}/tags?per_page=1", repo);
        let contributors_path = format!("/repos/{}/contributors?per_page=3", repo);
        let repo_full_path = format!("/repos/{}", repo);

        let (commits, languages, pulls, release, contents, tags, contributors, repo_full) = futures::join!(
            self.get(&commits_path),
            self.get(&languages_path),
            self.get(&pulls_path),
            self.get(&release_path),
            self.get(&contents_path),
            self.get(&tags_path),
            self.get(&contributors_path),
            self.get(&repo_full_path),
        );

        RepoExtras {
            commits,
            languages,
            pulls,
            release,
            contents,
            tags,
            contributors,
            repo_full,
        }
    }

    /// Probes the CI workflow directory (`/contents/.github/workflows`).
    pub async fn get_workflows(&self, repo: &str) -> FetchResult {
        debug!("probe workflow directory for {}", repo);
        self.get(&format!("/repos/{}/contents/.github/workflows", repo))
            .await
    }

    /// Downloads the repository owner's avatar image.
    ///
    /// Returns `None` on any failure; the report is then sent without an
    /// image.
    pub async fn fetch_avatar(&self, avatar_url: &str) -> Option<Vec<u8>> {
        debug!("download avatar {}", avatar_url);
        self.fetcher.fetch_bytes(avatar_url).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn requester_for(server: &mockito::Server) -> GithubRequester {
        GithubRequester::new(
            &server.url(),
            None,
            JsonFetcher::new(Duration::from_secs(5)),
        )
    }

    #[tokio::test]
    async fn test_get_repo() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/rust-lang/rust")
            .match_header("accept", API_ACCEPT)
            .match_header("user-agent", API_USER_AGENT)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name": "rust", "full_name": "rust-lang/rust"}"#)
            .create_async()
            .await;

        let requester = requester_for(&server);
        let result = requester.get_repo("rust-lang/rust").await;

        assert!(result.ok);
        assert_eq!(result.json.unwrap()["full_name"], "rust-lang/rust");
    }

    #[tokio::test]
    async fn test_get_repo_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/nobody/nothing")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let requester = requester_for(&server);
        let result = requester.get_repo("nobody/nothing").await;

        assert!(!result.ok);
        assert_eq!(result.status, Some(404));
    }

    #[tokio::test]
    async fn test_token_is_sent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/rust-lang/rust")
            .match_header("authorization", "token secret")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let requester = GithubRequester::new(
            &server.url(),
            Some("secret"),
            JsonFetcher::new(Duration::from_secs(5)),
        );
        let result = requester.get_repo("rust-lang/rust").await;

        assert!(result.ok);
    }

    #[tokio::test]
    async fn test_fetch_extras_settles_independently() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/a/b/tags?per_page=1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "v1.0.0"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/repos/a/b/releases/latest")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/repos/a/b/languages")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"Rust": 300, "Shell": 100}"#)
            .create_async()
            .await;

        let requester = requester_for(&server);
        let extras = requester.fetch_extras("a/b").await;

        // The 404 on the release endpoint affects only its own slot
        assert!(!extras.release.ok);
        assert_eq!(extras.release.status, Some(404));
        assert!(extras.tags.ok);
        assert!(extras.languages.ok);
        // Unmocked endpoints fail without aborting the join
        assert!(!extras.commits.ok);
        assert!(!extras.contributors.ok);
    }

    #[tokio::test]
    async fn test_get_workflows() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/repos/a/b/contents/.github/workflows")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "ci.yml"}, {"name": "release.yml"}]"#)
            .create_async()
            .await;

        let requester = requester_for(&server);
        let result = requester.get_workflows("a/b").await;

        assert!(result.ok);
        assert_eq!(result.json.unwrap().as_array().unwrap().len(), 2);
    }
}
