//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives
//! the collaborators it needs (requester or fetcher, messenger,
//! configuration) plus the per-invocation
//! [`CommandContext`](crate::commands::CommandContext), and replies through
//! the messenger.
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Validate and parse the trivial inbound input
//! 2. Issue one or more outbound HTTP requests
//! 3. Reformat the JSON responses into reply text
//! 4. Send the reply, quoting the triggering message
//!
//! A top-level guard around each pipeline turns any unexpected error into a
//! logged event plus one generic failure reply, so no invocation ends
//! without an answer.
//!
//! # Available Handlers
//!
//! - [`handle_repo_info`] - Compose and send the repository report
//! - [`handle_lyrics`] - Look up song lyrics across the provider chain

mod lyrics;
mod repo_info;

pub use crate::commands::actions::{lyrics::handle_lyrics, repo_info::handle_repo_info};
