//! Configuration structures for the bot command handlers.
//!
//! The configuration is loaded once at process start into an immutable
//! [`Config`] value that the hosting framework passes to each handler. It is
//! split into three sections: code-hosting API settings, lyrics provider
//! endpoints and general bot settings.
//!
//! # Configuration File Format
//!
//! The handlers use a YAML configuration file with the following structure
//! (every field is optional and defaults as shown):
//!
//! ```yaml
//! github:
//!   # Base URL of the code-hosting REST API
//!   api_url: "https://api.github.com"
//!
//!   # Repository reported when the message text names none
//!   default_repo: "RC-JESTOR/KNIGHT-BOT-RC-JESTOR"
//!
//!   # Optional API credential, sent as `Authorization: token <value>`
//!   token: ~
//!
//! lyrics:
//!   # Primary provider, song title passed as a single `q` query parameter
//!   primary_url: "https://lyricsapi.fly.dev/api/lyrics"
//!
//!   # First fallback, artist and track as path segments
//!   ovh_url: "https://api.lyrics.ovh/v1"
//!
//!   # Second fallback, song title passed as a `title` query parameter
//!   fallback_url: "https://some-random-api.com/lyrics"
//!
//! bot:
//!   # Timeout applied to every outbound HTTP request, in seconds
//!   timeout_secs: 10
//!
//!   # Fixed UTC offset for the last-updated timestamp, in minutes
//!   utc_offset_minutes: 330
//!
//!   # Package manifest probed for the bot version line
//!   manifest_path: "Cargo.toml"
//!
//!   # Local image attached to the repository report when present
//!   image_path: "assets/bot_image.jpg"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Any value can be overridden with a `KNIGHT_`-prefixed environment
//! variable, using `__` as the section separator:
//!
//! ```bash
//! export KNIGHT_GITHUB__DEFAULT_REPO="rust-lang/rust"
//! export KNIGHT_GITHUB__TOKEN="ghp_..."
//! ```

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::fetch::DEFAULT_TIMEOUT_SECS;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "KNIGHT_";

/// Root configuration structure for the bot command handlers.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Code-hosting API configuration
    pub github: Github,
    /// Lyrics provider endpoints
    pub lyrics: Lyrics,
    /// General bot settings
    pub bot: Bot,
}

impl Config {
    /// Loads the configuration from a YAML file merged with environment
    /// variable overrides.
    ///
    /// A missing file is not an error: all fields fall back to their
    /// defaults, so an empty deployment works out of the box.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an override contains a value that
    /// does not match the expected structure.
    pub fn load(path: &str) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

/// Code-hosting REST API configuration.
///
/// # YAML Section
///
/// ```yaml
/// github:
///   api_url: "https://api.github.com"
///   default_repo: "RC-JESTOR/KNIGHT-BOT-RC-JESTOR"
///   token: ~
/// ```
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Github {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,

    /// Repository reported when the triggering message names none.
    pub default_repo: String,

    /// Optional API credential.
    ///
    /// When set, every API request carries `Authorization: token <value>`,
    /// which raises the unauthenticated rate limit.
    pub token: Option<String>,
}

impl Default for Github {
    fn default() -> Self {
        Github {
            api_url: "https://api.github.com".to_owned(),
            default_repo: "RC-JESTOR/KNIGHT-BOT-RC-JESTOR".to_owned(),
            token: None,
        }
    }
}

/// Lyrics provider endpoints, tried in declaration order.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Lyrics {
    /// Primary provider; the song title is passed as a single `q` parameter.
    pub primary_url: String,

    /// First fallback; artist and track are appended as path segments.
    pub ovh_url: String,

    /// Second fallback; the song title is passed as a `title` parameter.
    pub fallback_url: String,
}

impl Default for Lyrics {
    fn default() -> Self {
        Lyrics {
            primary_url: "https://lyricsapi.fly.dev/api/lyrics".to_owned(),
            ovh_url: "https://api.lyrics.ovh/v1".to_owned(),
            fallback_url: "https://some-random-api.com/lyrics".to_owned(),
        }
    }
}

/// General bot settings.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Bot {
    /// Timeout applied to every outbound HTTP request, in seconds.
    pub timeout_secs: u64,

    /// Fixed UTC offset for the last-updated timestamp, in minutes.
    ///
    /// The default of 330 displays times at UTC+05:30.
    pub utc_offset_minutes: i32,

    /// Package manifest probed for the bot version line.
    ///
    /// Absence or a parse failure only drops the version line from the
    /// report.
    pub manifest_path: String,

    /// Local image attached to the repository report when present.
    ///
    /// When the file does not exist, the repository owner's avatar is
    /// downloaded instead.
    pub image_path: String,
}

impl Default for Bot {
    fn default() -> Self {
        Bot {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            utc_offset_minutes: 330,
            manifest_path: "Cargo.toml".to_owned(),
            image_path: "assets/bot_image.jpg".to_owned(),
        }
    }
}
