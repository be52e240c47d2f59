//! Short user-facing reply texts for the command handlers.
//!
//! The repository report itself is composed in
//! [`github::report`](crate::github::report); this module only holds the
//! one-line replies around it and around the lyrics lookup.

/// Formats the failure reply for an unfetchable repository.
///
/// This is the repository command's only hard-fail reply: it is sent when
/// the primary record cannot be fetched and the invocation ends there.
///
/// # Examples
///
/// ```
/// # use knightbot::commands::responses::format_repo_fetch_failure;
/// let msg = format_repo_fetch_failure("rust-lang/rust");
/// assert!(msg.contains("rust-lang/rust"));
/// ```
pub fn format_repo_fetch_failure(repo_id: &str) -> String {
    format!("❌ Could not fetch repository info for *{}*.", repo_id)
}

/// Formats the generic failure reply of the repository command.
pub fn format_repo_failure() -> String {
    "❌ Error fetching repository information.".to_owned()
}

/// Formats the usage hint sent when the lyrics command has no song title.
pub fn format_lyrics_usage() -> String {
    "🔍 Please enter the song name!\nExample: *.lyrics Faded Alan Walker*".to_owned()
}

/// Formats the interim acknowledgement sent before the lyrics lookup.
pub fn format_lyrics_searching() -> String {
    "🎵 Searching lyrics...".to_owned()
}

/// Formats the reply sent when every lyrics provider came up empty.
///
/// # Examples
///
/// ```
/// # use knightbot::commands::responses::format_lyrics_not_found;
/// let msg = format_lyrics_not_found("Faded");
/// assert!(msg.contains("Faded"));
/// ```
pub fn format_lyrics_not_found(song_title: &str) -> String {
    format!("❌ No lyrics found for: *{}*", song_title)
}

/// Formats the generic failure reply of the lyrics command.
pub fn format_lyrics_failure() -> String {
    "❌ Error fetching lyrics. Try another song name.".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_repo_fetch_failure() {
        assert_eq!(
            format_repo_fetch_failure("a/b"),
            "❌ Could not fetch repository info for *a/b*."
        );
    }

    #[test]
    fn test_format_repo_failure() {
        assert_eq!(format_repo_failure(), "❌ Error fetching repository information.");
    }

    #[test]
    fn test_format_lyrics_usage() {
        assert_eq!(
            format_lyrics_usage(),
            "🔍 Please enter the song name!\nExample: *.lyrics Faded Alan Walker*"
        );
    }

    #[test]
    fn test_format_lyrics_not_found() {
        assert_eq!(
            format_lyrics_not_found("Faded"),
            "❌ No lyrics found for: *Faded*"
        );
    }

    #[test]
    fn test_format_lyrics_failure() {
        assert_eq!(
            format_lyrics_failure(),
            "❌ Error fetching lyrics. Try another song name."
        );
    }
}
