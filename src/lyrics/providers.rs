//! Lyrics provider chain.
//!
//! Each provider is a small strategy value: it knows how to turn a song
//! title into its request URL and shares the response handling with the
//! others. Providers are tried strictly in order and the first one that
//! yields a non-empty lyrics text wins; everything else about a provider's
//! failure is irrelevant to the caller.

use log::{debug, warn};
use serde_json::Value;
use url::Url;

use crate::config;
use crate::fetch::JsonFetcher;

/// JSON paths where known providers place the lyrics text, in probe order.
const LYRICS_PATHS: [&str; 3] = ["/result/lyrics", "/lyrics", "/data/lyrics"];

/// How a provider expects the song title encoded into its URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStyle {
    /// Whole title as a single `q` query parameter
    WholeQuery,
    /// Title split on the first dash into `/artist/track` path segments
    ArtistTrackPath,
    /// Whole title as a single `title` query parameter
    TitleQuery,
}

/// One lyrics endpoint of the fallback chain.
#[derive(Debug, Clone)]
pub struct LyricsProvider {
    /// Endpoint base URL
    pub base_url: String,
    /// Title encoding used by the endpoint
    pub style: QueryStyle,
}

impl LyricsProvider {
    /// Builds the configured chain: primary, path-style fallback, then
    /// title-parameter fallback.
    pub fn chain(config: &config::Lyrics) -> Vec<LyricsProvider> {
        vec![
            LyricsProvider {
                base_url: config.primary_url.clone(),
                style: QueryStyle::WholeQuery,
            },
            LyricsProvider {
                base_url: config.ovh_url.clone(),
                style: QueryStyle::ArtistTrackPath,
            },
            LyricsProvider {
                base_url: config.fallback_url.clone(),
                style: QueryStyle::TitleQuery,
            },
        ]
    }

    /// Builds the request URL for a song title.
    ///
    /// Returns `None` when the configured base URL is not parseable; the
    /// chain then simply advances past this provider.
    pub fn build_url(&self, title: &str) -> Option<Url> {
        let mut url = Url::parse(&self.base_url).ok()?;

        match self.style {
            QueryStyle::WholeQuery => {
                url.query_pairs_mut().append_pair("q", title);
            }
            QueryStyle::TitleQuery => {
                url.query_pairs_mut().append_pair("title", title);
            }
            QueryStyle::ArtistTrackPath => {
                let (artist, track) = split_artist_track(title);
                url.path_segments_mut().ok()?.push(artist).push(track);
            }
        }

        Some(url)
    }
}

/// Splits a title on dashes into artist and track.
///
/// The artist is the first dash-separated segment (the whole title when that
/// segment is empty) and the track is the second segment (empty when the
/// title has no dash).
fn split_artist_track(title: &str) -> (&str, &str) {
    let mut segments = title.split('-');
    let artist = segments.next().unwrap_or_default();
    let track = segments.next().unwrap_or_default();

    if artist.is_empty() {
        (title, track)
    } else {
        (artist, track)
    }
}

/// Locates the lyrics text in a provider response.
///
/// Probes the known JSON paths in order and returns the first non-empty
/// string value.
pub fn extract_lyrics(json: &Value) -> Option<String> {
    for path in LYRICS_PATHS {
        if let Some(text) = json.pointer(path).and_then(Value::as_str)
            && !text.is_empty()
        {
            return Some(text.to_owned());
        }
    }

    None
}

/// Queries the provider chain for a song title.
///
/// Providers are tried sequentially in the given order; the first response
/// that is HTTP-ok, JSON-parseable and carries a non-empty lyrics field
/// short-circuits the rest. Returns `None` when every provider fails.
pub async fn lookup(
    fetcher: &JsonFetcher,
    providers: &[LyricsProvider],
    title: &str,
) -> Option<String> {
    for provider in providers {
        let Some(url) = provider.build_url(title) else {
            warn!("unparseable lyrics endpoint: {}", provider.base_url);
            continue;
        };

        let result = fetcher.fetch_json(url.as_str(), None).await;
        if !result.ok {
            debug!("lyrics provider failed: {}", provider.base_url);
            continue;
        }

        match result.json.as_ref().and_then(extract_lyrics) {
            Some(lyrics) => return Some(lyrics),
            None => debug!("no lyrics field in response from {}", provider.base_url),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn provider(base_url: &str, style: QueryStyle) -> LyricsProvider {
        LyricsProvider {
            base_url: base_url.to_owned(),
            style,
        }
    }

    #[test]
    fn test_split_artist_track() {
        assert_eq!(split_artist_track("Adele-Hello"), ("Adele", "Hello"));
        assert_eq!(split_artist_track("NoDash"), ("NoDash", ""));
        // Only the second dash-separated segment becomes the track
        assert_eq!(split_artist_track("a-b-c"), ("a", "b"));
        // An empty first segment falls back to the whole title
        assert_eq!(split_artist_track("-Hello"), ("-Hello", "Hello"));
    }

    #[test]
    fn test_build_url_whole_query() {
        let provider = provider("https://lyrics.example/api/lyrics", QueryStyle::WholeQuery);
        let url = provider.build_url("Faded Alan Walker").unwrap();

        assert_eq!(url.path(), "/api/lyrics");
        assert_eq!(
            url.query_pairs().next(),
            Some(("q".into(), "Faded Alan Walker".into()))
        );
    }

    #[test]
    fn test_build_url_title_query() {
        let provider = provider("https://lyrics.example/lyrics", QueryStyle::TitleQuery);
        let url = provider.build_url("Faded").unwrap();

        assert_eq!(
            url.query_pairs().next(),
            Some(("title".into(), "Faded".into()))
        );
    }

    #[test]
    fn test_build_url_artist_track_path() {
        let provider = provider("https://lyrics.example/v1", QueryStyle::ArtistTrackPath);
        let url = provider.build_url("Alan Walker-Faded").unwrap();

        assert_eq!(url.path(), "/v1/Alan%20Walker/Faded");
    }

    #[test]
    fn test_build_url_artist_track_path_without_dash() {
        let provider = provider("https://lyrics.example/v1", QueryStyle::ArtistTrackPath);
        let url = provider.build_url("Faded").unwrap();

        // Missing track half is passed as an empty segment
        assert_eq!(url.path(), "/v1/Faded/");
    }

    #[test]
    fn test_build_url_invalid_base() {
        let provider = provider("not a url", QueryStyle::WholeQuery);
        assert!(provider.build_url("Faded").is_none());
    }

    #[test]
    fn test_extract_lyrics_known_paths() {
        assert_eq!(
            extract_lyrics(&json!({"result": {"lyrics": "la la"}})),
            Some("la la".to_owned())
        );
        assert_eq!(
            extract_lyrics(&json!({"lyrics": "la la"})),
            Some("la la".to_owned())
        );
        assert_eq!(
            extract_lyrics(&json!({"data": {"lyrics": "la la"}})),
            Some("la la".to_owned())
        );
    }

    #[test]
    fn test_extract_lyrics_path_priority() {
        let json = json!({"result": {"lyrics": "first"}, "lyrics": "second"});
        assert_eq!(extract_lyrics(&json), Some("first".to_owned()));
    }

    #[test]
    fn test_extract_lyrics_rejects_empty_and_missing() {
        assert_eq!(extract_lyrics(&json!({"lyrics": ""})), None);
        assert_eq!(extract_lyrics(&json!({"lyrics": 42})), None);
        assert_eq!(extract_lyrics(&json!({"title": "Faded"})), None);
    }

    #[tokio::test]
    async fn test_lookup_first_success_short_circuits() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/primary")
            .match_query(mockito::Matcher::UrlEncoded(
                "q".to_owned(),
                "Faded".to_owned(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"result": {"lyrics": "You were the shadow"}}"#)
            .create_async()
            .await;
        let untouched = server
            .mock("GET", "/fallback")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let providers = vec![
            provider(&format!("{}/primary", server.url()), QueryStyle::WholeQuery),
            provider(&format!("{}/fallback", server.url()), QueryStyle::TitleQuery),
        ];

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let lyrics = lookup(&fetcher, &providers, "Faded").await;

        assert_eq!(lyrics, Some("You were the shadow".to_owned()));
        untouched.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_advances_past_failures() {
        let mut server = mockito::Server::new_async().await;
        // Provider 1: transport-level failure (server error)
        server
            .mock("GET", "/one")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        // Provider 2: ok response without any known lyrics path
        server
            .mock("GET", "/two/Adele/Hello")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"artist": "Adele"}"#)
            .create_async()
            .await;
        // Provider 3: carries the lyrics
        server
            .mock("GET", "/three")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"lyrics": "Hello from the other side"}"#)
            .create_async()
            .await;

        let providers = vec![
            provider(&format!("{}/one", server.url()), QueryStyle::WholeQuery),
            provider(&format!("{}/two", server.url()), QueryStyle::ArtistTrackPath),
            provider(&format!("{}/three", server.url()), QueryStyle::TitleQuery),
        ];

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        let lyrics = lookup(&fetcher, &providers, "Adele-Hello").await;

        assert_eq!(lyrics, Some("Hello from the other side".to_owned()));
    }

    #[tokio::test]
    async fn test_lookup_exhaustion() {
        let server = mockito::Server::new_async().await;

        let providers = vec![
            provider(&format!("{}/one", server.url()), QueryStyle::WholeQuery),
            provider(&format!("{}/two", server.url()), QueryStyle::TitleQuery),
        ];

        let fetcher = JsonFetcher::new(Duration::from_secs(5));
        assert_eq!(lookup(&fetcher, &providers, "Unknown Song").await, None);
    }
}
