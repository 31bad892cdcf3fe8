//! Mentions and the identities they resolve to

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A mention written as `<@name>` in a message
///
/// Borrows the name from the message it was extracted from. Matching is
/// case-insensitive, so lookups go through [`MentionToken::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MentionToken<'a> {
    name: &'a str,
}

impl<'a> MentionToken<'a> {
    /// Wrap an already-extracted mention name
    #[must_use]
    pub const fn new(name: &'a str) -> Self {
        Self { name }
    }

    /// The name exactly as written in the message
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.name
    }

    /// Lowercased name used for matching
    #[must_use]
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

impl std::fmt::Display for MentionToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// A single user on the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    /// Platform user ID
    pub id: String,
    /// Display name shown in the client
    pub display_name: String,
}

/// A user group on the chat platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Platform group ID
    pub id: String,
    /// Group name
    pub name: String,
}

impl Individual {
    /// Create an individual
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl Group {
    /// Create a group
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// What a mention resolved to
///
/// Users and groups use different mention syntax on the platform, so the
/// two are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Reference {
    /// A user, rendered as `<@ID>`
    Individual(String),
    /// A user group, rendered as `<!subteam^ID>`
    Group(String),
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual(id) => write!(f, "<@{id}>"),
            Self::Group(id) => write!(f, "<!subteam^{id}>"),
        }
    }
}

/// Resolved mentions for one message, keyed by lowercased name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentityMapping {
    entries: BTreeMap<String, Reference>,
}

impl IdentityMapping {
    /// Create an empty mapping
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Record a reference for a key, keeping the first one recorded
    ///
    /// Returns `true` if the key was not mapped yet.
    pub fn insert(&mut self, key: String, reference: Reference) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, reference);
        true
    }

    /// Look up the reference for a mention
    #[must_use]
    pub fn get(&self, token: &MentionToken<'_>) -> Option<&Reference> {
        self.entries.get(&token.key())
    }

    /// Whether a lowercased key is mapped
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of resolved names
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was resolved
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for IdentityMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (key, reference)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}: {reference}")?;
        }
        f.write_str("}")
    }
}
