//! Repository report composition.
//!
//! Pure formatting for the repository info command: identifier extraction
//! from free text, the header block built from the primary record, and the
//! auxiliary sections built from the eight side fetches. Every auxiliary
//! section is computed independently and simply skipped when its source
//! fetch failed or its payload is empty.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, Utc};
use rand::seq::SliceRandom;
use regex::Regex;
use serde_json::Value;

use crate::github::requester::RepoExtras;
use crate::github::response_structs::{CommitEntry, Contributor, Release, Repo, Tag, decode};
use crate::utils::{human_duration, relative_age};

/// Fixed set of community mood lines; one is picked at random per report.
pub const COMMUNITY_MOODS: [&str; 4] = [
    "🌟 Open to contributors",
    "🔥 Active development",
    "🤝 Welcomes PRs & ideas",
    "✨ Community-driven",
];

/// Two path-safe tokens separated by a slash, anywhere in the text.
static REPO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)").expect("invalid repository id pattern")
});

/// Extracts a repository identifier from free message text.
///
/// The first `owner/name` match wins; text without a match falls back to
/// the configured default. No further validation happens here: a
/// nonexistent repository only surfaces as a failed primary fetch.
///
/// # Examples
///
/// ```
/// # use knightbot::github::report::parse_repo_id;
/// assert_eq!(parse_repo_id("show me rust-lang/rust stats", "a/b"), "rust-lang/rust");
/// assert_eq!(parse_repo_id("no repository here", "a/b"), "a/b");
/// ```
pub fn parse_repo_id(text: &str, default_repo: &str) -> String {
    match REPO_ID_RE.captures(text) {
        Some(captures) => format!("{}/{}", &captures[1], &captures[2]),
        None => default_repo.to_owned(),
    }
}

/// Canonical browser URL of the repository.
fn repo_url(repo: &Repo, repo_id: &str) -> String {
    match &repo.html_url {
        Some(url) => url.clone(),
        None => format!("https://github.com/{}", repo_id),
    }
}

/// Renders the repository size in megabytes, `N/A` when absent or zero.
fn size_mb(size_kb: Option<u64>) -> String {
    match size_kb {
        Some(kb) if kb > 0 => format!("{:.2}", kb as f64 / 1024.0),
        _ => "N/A".to_owned(),
    }
}

/// Renders the last-update line value: formatted local time plus relative
/// age, or `N/A` when the timestamp is absent or unparseable.
fn last_updated(updated_at: Option<&str>, utc_offset_minutes: i32, now: DateTime<Utc>) -> String {
    let Some(raw) = updated_at else {
        return "N/A".to_owned();
    };
    let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) else {
        return "N/A".to_owned();
    };

    let offset = FixedOffset::east_opt(utc_offset_minutes * 60)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    let formatted = timestamp.with_timezone(&offset).format("%d/%m/%y - %H:%M:%S");
    let relative = relative_age(timestamp.with_timezone(&Utc), now);

    format!("{} ({})", formatted, relative)
}

/// Composes the report header block from the primary repository record.
///
/// Every line renders even when the record is sparse: missing values fall
/// back to `N/A`, zero counts, or the identifier itself, so a successful
/// primary fetch always yields a non-empty reply.
///
/// # Arguments
///
/// * `repo` - Decoded primary record
/// * `repo_id` - Identifier used for name and URL fallbacks
/// * `bot_version` - Version read from the local manifest, if any
/// * `uptime_secs` - Process uptime in seconds
/// * `utc_offset_minutes` - Display offset for the last-updated timestamp
pub fn format_header(
    repo: &Repo,
    repo_id: &str,
    bot_version: Option<&str>,
    uptime_secs: u64,
    utc_offset_minutes: i32,
) -> String {
    let mut text = String::from("*乂  Knight Bot MD  乂*\n\n");

    text.push_str(&format!(
        "✩ *Name*: {}\n",
        repo.name.as_deref().unwrap_or(repo_id)
    ));
    text.push_str(&format!("✩ *Size*: {} MB\n", size_mb(repo.size)));
    text.push_str(&format!(
        "✩ *Last Updated*: {}\n",
        last_updated(repo.updated_at.as_deref(), utc_offset_minutes, Utc::now())
    ));
    text.push_str(&format!("✩ *URL*: {}\n", repo_url(repo, repo_id)));
    text.push_str("✩ *Developer*: Navida Wijesuriya\n");
    text.push_str("✩ *Features*: Auto-Reply, Group Tools, Fun Commands\n");
    text.push_str("✩ *Status*: 🚀 Live and Improving\n\n");

    text.push_str(&format!(
        "✩ *Stars*: {}  •  *Forks*: {}  •  *Watchers*: {}\n",
        repo.stargazers_count, repo.forks_count, repo.watchers_count
    ));
    if let Some(version) = bot_version {
        text.push_str(&format!("✩ *Bot Version*: v{}\n", version));
    }
    text.push_str(&format!("✩ *Uptime*: {}\n\n", human_duration(uptime_secs)));

    text.push_str("💥 *KnightBot MD*\n\n✨ *Extra Info* ✨\n");

    text
}

/// One-line summary of the latest commit.
fn commit_line(extras: &RepoExtras, now: DateTime<Utc>) -> Option<String> {
    let commits: Vec<CommitEntry> = decode(&extras.commits)?;
    let entry = commits.first()?;

    let message = entry
        .commit
        .as_ref()
        .and_then(|detail| detail.message.as_deref())
        .and_then(|message| message.lines().next())
        .unwrap_or("No message");
    let author = entry
        .commit
        .as_ref()
        .and_then(|detail| detail.author.as_ref())
        .and_then(|signature| signature.name.as_deref())
        .or(entry
            .author
            .as_ref()
            .and_then(|account| account.login.as_deref()))
        .unwrap_or("Unknown");
    let age = entry
        .commit
        .as_ref()
        .and_then(|detail| detail.author.as_ref())
        .and_then(|signature| signature.date.as_deref())
        .and_then(|date| DateTime::parse_from_rfc3339(date).ok())
        .map(|date| relative_age(date.with_timezone(&Utc), now))
        .unwrap_or_else(|| "unknown time".to_owned());

    Some(format!(
        "🔧 Latest commit: \"{}\" — {} ({})\n",
        message, author, age
    ))
}

/// Byte-share breakdown of the top languages.
fn languages_line(extras: &RepoExtras) -> Option<String> {
    let languages: BTreeMap<String, u64> = decode(&extras.languages)?;
    if languages.is_empty() {
        return None;
    }

    let total = languages.values().sum::<u64>().max(1);
    let mut entries: Vec<(String, u64)> = languages.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    let shares = entries
        .into_iter()
        .take(4)
        .map(|(name, bytes)| {
            let percent = (bytes as f64 / total as f64 * 100.0).round() as u64;
            format!("{} {}%", name, percent)
        })
        .collect::<Vec<String>>()
        .join(" • ");

    Some(format!("🧩 Languages: {}\n", shares))
}

/// Open pull request count; shown whenever the fetch succeeded.
fn pulls_line(extras: &RepoExtras) -> Option<String> {
    if !extras.pulls.ok {
        return None;
    }
    let count = decode::<Vec<Value>>(&extras.pulls)
        .map(|pulls| pulls.len())
        .unwrap_or(0);

    Some(format!("🔁 Open PRs: {}\n", count))
}

/// Latest release, falling back to the latest tag when no release exists.
fn release_line(extras: &RepoExtras) -> Option<String> {
    if let Some(release) = decode::<Release>(&extras.release)
        && let Some(tag_name) = release.tag_name
    {
        let title = release
            .name
            .map(|name| format!(" — {}", name))
            .unwrap_or_default();
        return Some(format!("🏷️ Latest release: {}{}\n", tag_name, title));
    }

    let tags: Vec<Tag> = decode(&extras.tags)?;
    let tag = tags.first()?;
    Some(format!("🏷️ Latest tag: {}\n", tag.name))
}

/// Repository topics, preferring the primary record over the side fetch.
fn topics_line(repo: &Repo, extras: &RepoExtras) -> Option<String> {
    let mut topics = repo.topics.clone();
    if topics.is_empty() {
        topics = decode::<Repo>(&extras.repo_full)
            .map(|full| full.topics)
            .unwrap_or_default();
    }
    if topics.is_empty() {
        return None;
    }

    topics.truncate(6);
    Some(format!("🏷️ Topics: {}\n", topics.join(" · ")))
}

/// Count of top-level files and folders.
fn contents_line(extras: &RepoExtras) -> Option<String> {
    let entries: Vec<Value> = decode(&extras.contents)?;
    Some(format!(
        "📁 Top-level items: {} (files & folders)\n",
        entries.len()
    ))
}

/// Up to three top contributors with their contribution counts.
fn contributors_block(extras: &RepoExtras) -> Option<String> {
    let contributors: Vec<Contributor> = decode(&extras.contributors)?;
    if contributors.is_empty() {
        return None;
    }

    let mut block = String::from("\n👥 Top Contributors:\n");
    for (rank, contributor) in contributors.iter().take(3).enumerate() {
        block.push_str(&format!(
            "{}. {} — {} contribs\n",
            rank + 1,
            contributor.login.as_deref().unwrap_or("unknown"),
            contributor.contributions
        ));
    }

    Some(block)
}

/// Composes the auxiliary sections of the report.
///
/// Sections derived from the eight side fetches appear in fixed order, each
/// only when its fetch succeeded and its payload is non-empty. The static
/// sections (clone tip, command suggestions, community mood, badge URLs)
/// always appear.
///
/// # Arguments
///
/// * `repo` - Decoded primary record (topics and URL source)
/// * `repo_id` - Full `owner/name` used for the badge URLs
/// * `extras` - Settled results of the eight auxiliary fetches
pub fn format_extras(repo: &Repo, repo_id: &str, extras: &RepoExtras) -> String {
    let now = Utc::now();
    let mut text = String::new();

    for line in [
        commit_line(extras, now),
        languages_line(extras),
        pulls_line(extras),
        release_line(extras),
        topics_line(repo, extras),
        contents_line(extras),
    ]
    .into_iter()
    .flatten()
    {
        text.push_str(&line);
    }

    text.push_str(&format!(
        "\n💡 Quick Tip: Clone → `git clone {}.git`\n",
        repo_url(repo, repo_id)
    ));
    text.push_str("🚀 Try commands: .tagall | .tts | .sticker | .welcome\n");

    let mood = COMMUNITY_MOODS
        .choose(&mut rand::thread_rng())
        .unwrap_or(&COMMUNITY_MOODS[0]);
    text.push_str(&format!("\n🔔 Community: {}\n", mood));

    text.push_str("\n🔗 Badges:\n");
    text.push_str(&format!(
        "https://img.shields.io/github/v/release/{}?style=for-the-badge\n",
        repo_id
    ));
    text.push_str(&format!(
        "https://img.shields.io/github/license/{}?style=for-the-badge\n",
        repo_id
    ));
    text.push_str(&format!(
        "https://img.shields.io/github/commit-activity/y/{}?style=for-the-badge\n",
        repo_id
    ));

    if let Some(block) = contributors_block(extras) {
        text.push_str(&block);
    }

    text
}

/// Workflow count line from the CI directory probe, when non-empty.
pub fn format_workflows(result: &crate::fetch::FetchResult) -> Option<String> {
    let workflows: Vec<Value> = decode(result)?;
    if workflows.is_empty() {
        return None;
    }

    Some(format!(
        "\n⚙️ CI Workflows: {} workflow(s) detected\n",
        workflows.len()
    ))
}
