//! Response structures for the code-hosting REST API.
//!
//! This module contains tolerant structures for deserializing the JSON
//! payloads the report composition consumes. Every field that may be absent
//! is optional, so a partially-populated payload still decodes; a payload
//! that fails to decode altogether is treated the same as a failed fetch.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::fetch::FetchResult;

/// Decodes the JSON payload of a successful fetch into a typed value.
///
/// Returns `None` when the fetch failed, carried no body, or the body does
/// not match the expected shape. Auxiliary report sections use this to
/// silently skip malformed payloads.
pub fn decode<T: DeserializeOwned>(result: &FetchResult) -> Option<T> {
    if !result.ok {
        return None;
    }
    let json = result.json.as_ref()?;
    serde_json::from_value(json.clone()).ok()
}

/// Repository record from `GET /repos/{owner}/{name}`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Repo {
    /// Short repository name.
    pub name: Option<String>,
    /// `owner/name` as reported by the API.
    pub full_name: Option<String>,
    /// Size in kilobytes.
    pub size: Option<u64>,
    /// Last-update timestamp, RFC 3339.
    pub updated_at: Option<String>,
    /// Canonical browser URL.
    pub html_url: Option<String>,
    /// Star count.
    #[serde(default)]
    pub stargazers_count: u64,
    /// Fork count.
    #[serde(default)]
    pub forks_count: u64,
    /// Watcher count.
    #[serde(default)]
    pub watchers_count: u64,
    /// Repository topics.
    #[serde(default)]
    pub topics: Vec<String>,
    /// Owning account.
    pub owner: Option<Owner>,
}

/// Owning account of a repository.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Owner {
    /// URL of the account avatar image.
    pub avatar_url: Option<String>,
}

/// One entry of the commit list from `GET /repos/{id}/commits`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommitEntry {
    /// Git-level commit data.
    pub commit: Option<CommitDetail>,
    /// Hosting-level author account, used when the git signature has no name.
    pub author: Option<AccountRef>,
}

/// Git-level data of a commit.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommitDetail {
    /// Full commit message; only the first line is reported.
    pub message: Option<String>,
    /// Author signature.
    pub author: Option<CommitSignature>,
}

/// Author signature of a commit.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CommitSignature {
    /// Author name as recorded in the commit.
    pub name: Option<String>,
    /// Author timestamp, RFC 3339.
    pub date: Option<String>,
}

/// Reference to a hosting-platform account.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AccountRef {
    /// Account login.
    pub login: Option<String>,
}

/// Release record from `GET /repos/{id}/releases/latest`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Release {
    /// Tag the release was cut from.
    pub tag_name: Option<String>,
    /// Human-readable release title.
    pub name: Option<String>,
}

/// One entry of the tag list from `GET /repos/{id}/tags`.
#[derive(Deserialize, Debug, Clone)]
pub struct Tag {
    /// Tag name.
    pub name: String,
}

/// One entry of the contributor list from `GET /repos/{id}/contributors`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Contributor {
    /// Contributor login.
    pub login: Option<String>,
    /// Number of contributions to the default branch.
    #[serde(default)]
    pub contributions: u64,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ok_result(json: serde_json::Value) -> FetchResult {
        FetchResult {
            ok: true,
            status: Some(200),
            json: Some(json),
        }
    }

    #[test]
    fn test_decode_repo() {
        let result = ok_result(json!({
            "name": "rust",
            "full_name": "rust-lang/rust",
            "size": 1024,
            "stargazers_count": 90000,
            "topics": ["language", "compiler"],
            "owner": {"avatar_url": "https://example.com/avatar.png"}
        }));

        let repo: Repo = decode(&result).unwrap();
        assert_eq!(repo.name.as_deref(), Some("rust"));
        assert_eq!(repo.full_name.as_deref(), Some("rust-lang/rust"));
        assert_eq!(repo.size, Some(1024));
        assert_eq!(repo.stargazers_count, 90000);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.topics, vec!["language", "compiler"]);
        assert_eq!(
            repo.owner.unwrap().avatar_url.as_deref(),
            Some("https://example.com/avatar.png")
        );
    }

    #[test]
    fn test_decode_failed_fetch() {
        let result = FetchResult {
            ok: false,
            status: Some(404),
            json: None,
        };

        assert!(decode::<Repo>(&result).is_none());
    }

    #[test]
    fn test_decode_shape_mismatch() {
        // A commits payload is an array; an object should not decode into it
        let result = ok_result(json!({"message": "Bad credentials"}));

        assert!(decode::<Vec<CommitEntry>>(&result).is_none());
    }

    #[test]
    fn test_decode_commit_entry_fallback_fields() {
        let result = ok_result(json!([{
            "commit": {"message": "Fix parser\n\nLonger body", "author": {"date": "2024-05-01T10:00:00Z"}},
            "author": {"login": "alice"}
        }]));

        let commits: Vec<CommitEntry> = decode(&result).unwrap();
        let entry = &commits[0];
        let detail = entry.commit.as_ref().unwrap();
        assert_eq!(detail.message.as_deref(), Some("Fix parser\n\nLonger body"));
        assert!(detail.author.as_ref().unwrap().name.is_none());
        assert_eq!(entry.author.as_ref().unwrap().login.as_deref(), Some("alice"));
    }
}
