//! Chat platform port
//!
//! Channel discovery and message posting.

use super::PlatformError;
use crate::core::models::{Block, ChannelPage, PostedMessage};

/// Channels and messages on the chat platform
#[cfg_attr(test, mockall::automock)]
pub trait ChatPlatform {
    /// List one page of public, unarchived channels
    ///
    /// Pass `None` for the first page and the returned cursor afterwards.
    fn list_channels(&self, cursor: Option<String>) -> Result<ChannelPage, PlatformError>;

    /// Post a message with a plain-text fallback and layout blocks
    fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        blocks: &[Block],
    ) -> Result<PostedMessage, PlatformError>;
}
