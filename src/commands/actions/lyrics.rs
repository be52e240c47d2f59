//! Lyrics command handler.
//!
//! Looks up song lyrics across the configured provider chain and replies
//! with the text, split over several messages when it exceeds the chat
//! network's message size limit.

use log::{debug, error, info, warn};

use crate::{
    commands::{
        CommandContext,
        responses::{
            format_lyrics_failure, format_lyrics_not_found, format_lyrics_searching,
            format_lyrics_usage,
        },
    },
    config::Config,
    fetch::JsonFetcher,
    lyrics::{LyricsProvider, MAX_MESSAGE_CHARS, chunk_text, lookup},
    messaging::Messenger,
};

/// Looks up lyrics for a song title and sends the result.
///
/// An empty title is answered with a usage hint and no provider is queried.
/// Any error the pipeline does not handle locally is caught here, logged,
/// and answered with a generic failure reply.
///
/// # Arguments
///
/// * `fetcher` - Shared JSON fetcher
/// * `messenger` - Outbound messaging collaborator
/// * `config` - Immutable process configuration
/// * `song_title` - Title as parsed by the dispatch framework
/// * `context` - Chat id and triggering message
pub async fn handle_lyrics<M: Messenger>(
    fetcher: &JsonFetcher,
    messenger: &M,
    config: &Config,
    song_title: &str,
    context: &CommandContext,
) {
    if let Err(e) = run(fetcher, messenger, config, song_title, context).await {
        error!("lyrics command failed: {:#}", e);
        let _ = messenger
            .send_text(&context.chat_id, &format_lyrics_failure(), &context.message)
            .await;
    }
}

/// The lookup pipeline; every reply send is awaited before the next one so
/// multi-part lyrics arrive in order.
async fn run<M: Messenger>(
    fetcher: &JsonFetcher,
    messenger: &M,
    config: &Config,
    song_title: &str,
    context: &CommandContext,
) -> Result<(), anyhow::Error> {
    let title = song_title.trim();
    if title.is_empty() {
        debug!("lyrics command without a song title");
        messenger
            .send_text(&context.chat_id, &format_lyrics_usage(), &context.message)
            .await?;
        return Ok(());
    }

    info!("searching lyrics for {}", title);

    // Best-effort acknowledgement; the lookup proceeds even if it fails
    if let Err(e) = messenger
        .send_text(
            &context.chat_id,
            &format_lyrics_searching(),
            &context.message,
        )
        .await
    {
        warn!("failed to send search acknowledgement: {:#}", e);
    }

    let providers = LyricsProvider::chain(&config.lyrics);
    let Some(lyrics) = lookup(fetcher, &providers, title).await else {
        messenger
            .send_text(
                &context.chat_id,
                &format_lyrics_not_found(title),
                &context.message,
            )
            .await?;
        return Ok(());
    };

    if lyrics.chars().count() <= MAX_MESSAGE_CHARS {
        messenger
            .send_text(&context.chat_id, &lyrics, &context.message)
            .await?;
        return Ok(());
    }

    for part in chunk_text(&lyrics, MAX_MESSAGE_CHARS) {
        messenger
            .send_text(&context.chat_id, &part, &context.message)
            .await?;
    }

    Ok(())
}
