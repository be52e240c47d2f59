//! Code-hosting platform integration for the repository report.
//!
//! This module provides everything behind the repository info command: the
//! API client, tolerant response structures and the pure report composition.
//!
//! # Modules
//!
//! - `requester` - HTTP client issuing the primary and auxiliary API requests
//! - `response_structs` - Tolerant structures for API payloads
//! - `report` - Identifier extraction and report text composition
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use knightbot::fetch::JsonFetcher;
//! use knightbot::github::GithubRequester;
//!
//! # async fn example() {
//! let fetcher = JsonFetcher::new(Duration::from_secs(10));
//! let requester = GithubRequester::new("https://api.github.com", None, fetcher);
//! let extras = requester.fetch_extras("rust-lang/rust").await;
//! println!("commit fetch ok: {}", extras.commits.ok);
//! # }
//! ```

pub mod report;
mod requester;
pub mod response_structs;

pub use crate::github::requester::{GithubRequester, RepoExtras};
