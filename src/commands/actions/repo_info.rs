//! Repository info command handler.
//!
//! Builds the repository report: resolves the target repository from the
//! message text, fetches the primary record, issues the eight auxiliary
//! fetches concurrently, composes the report and sends it, with the owner
//! avatar or a local asset attached when available.
//!
//! Only the primary fetch is fatal; every auxiliary fetch, the local
//! manifest probe and the image lookup degrade by omission.

use std::path::Path;

use log::{debug, error, info, warn};

use crate::{
    commands::{
        CommandContext,
        responses::{format_repo_failure, format_repo_fetch_failure},
    },
    config::Config,
    github::{
        GithubRequester,
        report::{format_extras, format_header, format_workflows, parse_repo_id},
        response_structs::{Repo, decode},
    },
    messaging::Messenger,
};

/// Composes and sends the repository report.
///
/// Side effect only: exactly one outbound report message, or one failure
/// message. Any error the pipeline does not handle locally is caught here,
/// logged, and answered with a generic failure reply.
///
/// # Arguments
///
/// * `requester` - API client for the code-hosting platform
/// * `messenger` - Outbound messaging collaborator
/// * `config` - Immutable process configuration
/// * `context` - Chat id, triggering message and process start instant
pub async fn handle_repo_info<M: Messenger>(
    requester: &GithubRequester,
    messenger: &M,
    config: &Config,
    context: &CommandContext,
) {
    if let Err(e) = run(requester, messenger, config, context).await {
        error!("repository info command failed: {:#}", e);
        let _ = messenger
            .send_text(&context.chat_id, &format_repo_failure(), &context.message)
            .await;
    }
}

/// The report pipeline; all sends are awaited so failures reach the guard.
async fn run<M: Messenger>(
    requester: &GithubRequester,
    messenger: &M,
    config: &Config,
    context: &CommandContext,
) -> Result<(), anyhow::Error> {
    let text = context.message.text();
    let repo_id = parse_repo_id(&text, &config.github.default_repo);
    info!("composing repository report for {}", repo_id);

    // The primary record is the single hard requirement
    let primary = requester.get_repo(&repo_id).await;
    if !primary.ok {
        warn!(
            "primary fetch failed for {} (status {:?})",
            repo_id, primary.status
        );
        messenger
            .send_text(
                &context.chat_id,
                &format_repo_fetch_failure(&repo_id),
                &context.message,
            )
            .await?;
        return Ok(());
    }
    let repo: Repo = decode(&primary).unwrap_or_default();

    let version = read_manifest_version(&config.bot.manifest_path);
    let uptime_secs = context.started_at.elapsed().as_secs();
    let mut report = format_header(
        &repo,
        &repo_id,
        version.as_deref(),
        uptime_secs,
        config.bot.utc_offset_minutes,
    );

    // Auxiliary fetches run against the API-reported full name when present
    let owner_repo = repo.full_name.clone().unwrap_or_else(|| repo_id.clone());
    let extras = requester.fetch_extras(&owner_repo).await;
    report.push_str(&format_extras(&repo, &owner_repo, &extras));

    let workflows = requester.get_workflows(&owner_repo).await;
    if let Some(line) = format_workflows(&workflows) {
        report.push_str(&line);
    }

    match load_report_image(requester, &repo, &config.bot.image_path).await {
        Some(image) => {
            messenger
                .send_image(&context.chat_id, image, &report, &context.message)
                .await?
        }
        None => {
            messenger
                .send_text(&context.chat_id, &report, &context.message)
                .await?
        }
    }

    Ok(())
}

/// Reads the bot version from a local package manifest.
///
/// Absence of the file or a parse failure only drops the version line.
fn read_manifest_version(path: &str) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    let manifest: toml::Value = toml::from_str(&raw).ok()?;

    manifest
        .get("package")?
        .get("version")?
        .as_str()
        .map(str::to_owned)
}

/// Picks the report image: the local asset when the file exists, else the
/// repository owner's avatar.
///
/// Any read or download failure leaves the image unset and the report goes
/// out as plain text.
async fn load_report_image(
    requester: &GithubRequester,
    repo: &Repo,
    image_path: &str,
) -> Option<Vec<u8>> {
    let path = Path::new(image_path);
    if path.exists() {
        debug!("attaching local image {}", image_path);
        return std::fs::read(path).ok();
    }

    let avatar_url = repo.owner.as_ref()?.avatar_url.as_deref()?;
    requester.fetch_avatar(avatar_url).await
}
