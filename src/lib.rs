//! Knight Bot command handlers for repository reports and lyrics lookup.
//!
//! This crate implements two chat-bot commands for a messaging automation
//! bot. The messaging transport, command routing and authentication are
//! owned by the hosting framework; this crate only receives a chat id, the
//! triggering message and an outbound [`messaging::Messenger`]
//! implementation, and replies through it.
//!
//! # Commands
//!
//! - **Repository report** ([`commands::actions::handle_repo_info`]):
//!   resolves an `owner/name` identifier from the message text (or a
//!   configured default), fetches the repository record plus eight
//!   auxiliary data sets from the code-hosting REST API, composes a
//!   formatted summary and sends it, with the owner avatar or a local
//!   image attached when available. Only the primary fetch is fatal;
//!   every other section degrades by omission.
//!
//! - **Lyrics lookup** ([`commands::actions::handle_lyrics`]): queries up
//!   to three lyrics providers sequentially, first success wins, and sends
//!   the text, split across messages beyond 4096 characters.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings (every field optional):
//!
//! ```yaml
//! github:
//!   default_repo: "RC-JESTOR/KNIGHT-BOT-RC-JESTOR"
//!   token: ~
//!
//! lyrics:
//!   primary_url: "https://lyricsapi.fly.dev/api/lyrics"
//!
//! bot:
//!   timeout_secs: 10
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the
//! `KNIGHT_` prefix:
//!
//! ```bash
//! export KNIGHT_GITHUB__DEFAULT_REPO="rust-lang/rust"
//! export KNIGHT_GITHUB__TOKEN="ghp_..."
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::time::{Duration, Instant};
//!
//! use knightbot::commands::{CommandContext, actions::handle_repo_info};
//! use knightbot::config::Config;
//! use knightbot::fetch::JsonFetcher;
//! use knightbot::github::GithubRequester;
//! use knightbot::messaging::{InboundMessage, MockMessenger};
//!
//! # async fn example() -> Result<(), figment::Error> {
//! let config = Config::load("config.yaml")?;
//! let fetcher = JsonFetcher::new(Duration::from_secs(config.bot.timeout_secs));
//! let requester = GithubRequester::new(
//!     &config.github.api_url,
//!     config.github.token.as_deref(),
//!     fetcher,
//! );
//!
//! // The hosting framework implements Messenger on its connection handle
//! let messenger = MockMessenger::new();
//!
//! let context = CommandContext {
//!     chat_id: "chat@g.us".to_owned(),
//!     message: InboundMessage::conversation("!github rust-lang/rust"),
//!     started_at: Instant::now(),
//! };
//! handle_repo_info(&requester, &messenger, &config, &context).await;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The crate consists of several modules:
//!
//! - [`commands`] - The two handlers, their context and reply texts
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`fetch`] - Shared JSON fetcher with uniform failure handling
//! - [`github`] - Code-hosting API client and report composition
//! - [`lyrics`] - Lyrics provider chain and message chunking
//! - [`messaging`] - Inbound message shapes and the outbound contract
//! - [`utils`] - Duration and relative-age formatting
//!
//! # Logging
//!
//! All modules log through the `log` facade; the hosting binary installs
//! the logger implementation and controls verbosity (e.g. via `RUST_LOG`
//! with `env_logger`).

pub mod commands;
pub mod config;
pub mod fetch;
pub mod github;
pub mod lyrics;
pub mod messaging;
pub mod utils;
