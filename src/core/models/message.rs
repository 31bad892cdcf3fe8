//! Message layout and channel types
//!
//! Blocks serialize to the JSON shape the Slack block kit expects.

use serde::{Deserialize, Serialize};

/// A text element in a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    /// Text format, always `mrkdwn` here
    #[serde(rename = "type")]
    pub kind: String,
    /// The text itself
    pub text: String,
}

impl TextObject {
    /// Create a markdown text element
    #[must_use]
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            kind: "mrkdwn".to_string(),
            text: text.into(),
        }
    }
}

/// A layout block in a posted message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A section holding the main text
    Section {
        /// Section text
        text: TextObject,
    },
    /// A horizontal rule
    Divider,
    /// Small secondary text
    Context {
        /// Context elements
        elements: Vec<TextObject>,
    },
}

/// Build metadata shown under the message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Link to the build
    pub build_url: String,
    /// ID of the job that ran this step
    pub job_id: String,
    /// Organization slug
    pub organization_slug: String,
    /// Pipeline name
    pub pipeline_name: String,
    /// Build number
    pub build_number: String,
}

/// A chat channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel ID
    pub id: String,
    /// Channel name without the leading `#`
    pub name: String,
}

impl Channel {
    /// Create a channel
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One page of a channel listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelPage {
    /// Channels on this page
    pub channels: Vec<Channel>,
    /// Cursor for the next page, `None` on the last page
    pub next_cursor: Option<String>,
}

/// Where a message ended up after posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostedMessage {
    /// Channel the message was posted to
    pub channel: String,
    /// Message timestamp, which is its ID on the platform
    pub ts: String,
}
