//! Slack Web API adapter
//!
//! Implements [`IdentityLookup`] and [`ChatPlatform`] on top of the Slack Web
//! API using a blocking HTTP client. Calls are made once; failures are
//! returned to the caller, never retried.

mod types;

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::models::{Block, ChannelPage, Group, Individual, PostedMessage};
use crate::core::ports::{ChatPlatform, IdentityLookup, PlatformError};

use types::{ConversationsList, PostMessageRequest, PostMessageResponse, UserGroupsList, UsersList};

/// Default Slack Web API endpoint
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Page size for paginated listings, as recommended by Slack
const PAGE_LIMIT: &str = "200";

const TIMEOUT: Duration = Duration::from_secs(30);

/// Slack Web API client authenticated with a bot token
pub struct SlackClient {
    http: Client,
    token: String,
    base_url: String,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a client for the public Slack API
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>) -> Result<Self, PlatformError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Create a client for a custom API endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, PlatformError> {
        let http = Client::builder()
            .timeout(TIMEOUT)
            .user_agent(concat!("step-notify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlatformError::transport("client", e))?;

        Ok(Self {
            http,
            token: token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, method: &str, params: &[(&str, &str)]) -> Result<Url, PlatformError> {
        let raw = format!("{}/{method}", self.base_url);
        let url = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        url.map_err(|e| PlatformError::transport(method, e))
    }

    fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlatformError> {
        let url = self.url(method, params)?;
        self.call(method, self.http.get(url))
    }

    /// Send a request and unwrap Slack's `{"ok": ..., "error": ...}` envelope
    fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        request: RequestBuilder,
    ) -> Result<T, PlatformError> {
        log::debug!("calling slack {method}");
        let response = request
            .bearer_auth(&self.token)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| PlatformError::transport(method, e))?;

        let body: Value = response.json().map_err(|e| PlatformError::decode(method, e))?;
        if body.get("ok").and_then(Value::as_bool) != Some(true) {
            let code = body.get("error").and_then(Value::as_str).unwrap_or("unknown_error");
            return Err(PlatformError::api(method, code));
        }

        serde_json::from_value(body).map_err(|e| PlatformError::decode(method, e))
    }
}

impl IdentityLookup for SlackClient {
    fn list_individuals(&self) -> Result<Vec<Individual>, PlatformError> {
        let mut individuals = Vec::new();
        let mut cursor = String::new();

        loop {
            let mut params = vec![("limit", PAGE_LIMIT)];
            if !cursor.is_empty() {
                params.push(("cursor", cursor.as_str()));
            }
            let page: UsersList = self.get("users.list", &params)?;

            individuals.extend(page.members.into_iter().filter(|m| !m.deleted).map(Individual::from));

            match page.response_metadata.cursor() {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(individuals)
    }

    fn list_groups(&self) -> Result<Vec<Group>, PlatformError> {
        let list: UserGroupsList = self.get("usergroups.list", &[])?;
        Ok(list.usergroups.into_iter().map(Group::from).collect())
    }
}

impl ChatPlatform for SlackClient {
    fn list_channels(&self, cursor: Option<String>) -> Result<ChannelPage, PlatformError> {
        let mut params = vec![
            ("types", "public_channel"),
            ("exclude_archived", "true"),
            ("limit", PAGE_LIMIT),
        ];
        if let Some(cursor) = cursor.as_deref() {
            params.push(("cursor", cursor));
        }

        let list: ConversationsList = self.get("conversations.list", &params)?;
        Ok(ChannelPage {
            channels: list.channels.into_iter().map(Into::into).collect(),
            next_cursor: list.response_metadata.cursor(),
        })
    }

    fn post_message(
        &self,
        channel_id: &str,
        text: &str,
        blocks: &[Block],
    ) -> Result<PostedMessage, PlatformError> {
        const METHOD: &str = "chat.postMessage";

        let url = self.url(METHOD, &[])?;
        let payload = PostMessageRequest {
            channel: channel_id,
            text,
            blocks,
        };
        let response: PostMessageResponse = self.call(METHOD, self.http.post(url).json(&payload))?;
        Ok(response.into())
    }
}
