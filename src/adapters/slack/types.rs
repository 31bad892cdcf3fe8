//! Wire types for the Slack Web API methods we call

use serde::{Deserialize, Serialize};

use crate::core::models::{Block, Channel, Group, Individual, PostedMessage};

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

impl ResponseMetadata {
    pub fn cursor(self) -> Option<String> {
        Some(self.next_cursor).filter(|c| !c.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct UsersList {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub profile: Profile,
}

#[derive(Debug, Default, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub display_name: String,
}

impl From<Member> for Individual {
    fn from(member: Member) -> Self {
        Self::new(member.id, member.profile.display_name)
    }
}

#[derive(Debug, Deserialize)]
pub struct UserGroupsList {
    #[serde(default)]
    pub usergroups: Vec<UserGroup>,
}

#[derive(Debug, Deserialize)]
pub struct UserGroup {
    pub id: String,
    pub name: String,
}

impl From<UserGroup> for Group {
    fn from(group: UserGroup) -> Self {
        Self::new(group.id, group.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct ConversationsList {
    #[serde(default)]
    pub channels: Vec<Conversation>,
    #[serde(default)]
    pub response_metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize)]
pub struct Conversation {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl From<Conversation> for Channel {
    fn from(conversation: Conversation) -> Self {
        Self::new(conversation.id, conversation.name)
    }
}

#[derive(Debug, Serialize)]
pub struct PostMessageRequest<'a> {
    pub channel: &'a str,
    pub text: &'a str,
    pub blocks: &'a [Block],
}

#[derive(Debug, Deserialize)]
pub struct PostMessageResponse {
    pub channel: String,
    pub ts: String,
}

impl From<PostMessageResponse> for PostedMessage {
    fn from(response: PostMessageResponse) -> Self {
        Self {
            channel: response.channel,
            ts: response.ts,
        }
    }
}
