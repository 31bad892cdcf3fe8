//! Channel finder - locates a channel by name across paginated listings

use thiserror::Error;

use crate::core::models::Channel;
use crate::core::ports::{ChatPlatform, PlatformError};

/// Errors that can occur while looking for a channel
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No public channel has this name
    #[error("could not find channel named {0:?}")]
    NotFound(String),

    /// Listing channels failed
    #[error("failed to list channels")]
    Platform(#[from] PlatformError),
}

/// Find a public channel by name, ignoring case and a leading `#`
///
/// Pages are fetched until the channel turns up or the listing ends.
///
/// # Errors
///
/// Returns [`ChannelError::NotFound`] when no channel matches and
/// [`ChannelError::Platform`] when a page cannot be listed.
pub fn find_channel<P>(platform: &P, name: &str) -> Result<Channel, ChannelError>
where
    P: ChatPlatform + ?Sized,
{
    let wanted = name.trim_start_matches('#').to_lowercase();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = platform.list_channels(cursor)?;
        pages += 1;

        if let Some(channel) = page.channels.into_iter().find(|c| c.name.to_lowercase() == wanted) {
            log::debug!("found channel #{} ({}) after {pages} page(s)", channel.name, channel.id);
            return Ok(channel);
        }

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    Err(ChannelError::NotFound(name.to_string()))
}
