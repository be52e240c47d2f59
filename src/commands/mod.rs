//! Chat command handlers and their shared context.
//!
//! This module provides the two command handlers the hosting dispatch
//! framework invokes, plus the per-invocation context they receive.
//!
//! # Architecture
//!
//! ```text
//! Inbound chat message
//!        │ (dispatch framework routes the command)
//!        ▼
//! ┌──────────────────────┐
//! │  actions handlers    │
//! │  - handle_repo_info  │
//! │  - handle_lyrics     │
//! └──────────────────────┘
//!        │ one or more HTTP fetches, text composition
//!        ▼
//! ┌──────────────────────┐
//! │  Messenger (trait)   │  ← implemented by the framework
//! └──────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Each handler wraps its pipeline in a top-level guard: any error that is
//! not already handled inside the pipeline is logged and answered with a
//! single generic failure message. Handlers never return errors to the
//! dispatcher and never leave the chat without a reply.
//!
//! # Module Organization
//!
//! - [`actions`] - Individual command handler implementations
//! - [`responses`] - Short user-facing reply texts

use std::time::Instant;

use crate::messaging::InboundMessage;

pub mod actions;
pub mod responses;

/// Per-invocation context handed over by the dispatch framework.
///
/// # Examples
///
/// ```
/// # use std::time::Instant;
/// # use knightbot::commands::CommandContext;
/// # use knightbot::messaging::InboundMessage;
/// let context = CommandContext {
///     chat_id: "120363001234567890@g.us".to_owned(),
///     message: InboundMessage::conversation("!github rust-lang/rust"),
///     started_at: Instant::now(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Chat where the triggering message was received
    pub chat_id: String,
    /// The triggering message, quoted in every reply
    pub message: InboundMessage,
    /// Process start instant, for the uptime line of the repository report
    pub started_at: Instant,
}
