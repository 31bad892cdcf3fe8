//! Notification delivery - channel lookup, mention resolution, posting
//!
//! Runs after the conditions have already said yes. Every step must succeed
//! before anything is posted.

use thiserror::Error;

use super::channels::{ChannelError, find_channel};
use super::mentions::{ResolveError, resolve_mentions};
use super::message::compose_blocks;
use crate::core::models::{BuildInfo, Channel, EvaluationInput, PostedMessage};
use crate::core::ports::{ChatPlatform, IdentityLookup, PlatformError};

/// Errors that can occur while delivering a notification
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The target channel could not be found
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Mentions in the message could not be resolved
    #[error(transparent)]
    Mentions(#[from] ResolveError),

    /// Posting the message failed
    #[error("failed to post message to #{channel}")]
    Post {
        /// Channel name
        channel: String,
        /// Underlying platform error
        #[source]
        source: PlatformError,
    },
}

/// What to send and where
#[derive(Debug, Clone, Copy)]
pub struct Notification<'a> {
    /// Channel name, with or without a leading `#`
    pub channel_name: &'a str,
    /// Message template with `<@name>` mentions
    pub message: &'a str,
    /// Build the message is about
    pub build: &'a BuildInfo,
    /// Outcome of the step, for the message footer
    pub input: &'a EvaluationInput,
}

/// A posted notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Channel the message went to
    pub channel: Channel,
    /// Message text after mention substitution
    pub text: String,
    /// Platform receipt
    pub posted: PostedMessage,
}

/// Find the channel, resolve mentions, then post
///
/// The channel is looked up first so a misconfigured channel fails before
/// any user or group listing is requested.
///
/// # Errors
///
/// Returns the first step that failed; nothing is posted in that case.
pub fn deliver<P>(platform: &P, notification: &Notification<'_>) -> Result<Delivery, NotifyError>
where
    P: ChatPlatform + IdentityLookup + ?Sized,
{
    let channel = find_channel(platform, notification.channel_name)?;
    let text = resolve_mentions(notification.message, platform)?;
    let blocks = compose_blocks(&text, notification.build, notification.input);

    let posted = platform.post_message(&channel.id, &text, &blocks).map_err(|source| {
        NotifyError::Post {
            channel: channel.name.clone(),
            source,
        }
    })?;
    log::info!("posted notification to #{} ({})", channel.name, channel.id);

    Ok(Delivery {
        channel,
        text,
        posted,
    })
}
