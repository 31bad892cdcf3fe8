//! Mention resolver - turns `<@name>` mentions into platform references
//!
//! Three steps, all driven by the same scanner:
//!
//! 1. [`extract_mentions`] finds every `<@name>` in a message
//! 2. [`find_mappings`] looks each distinct name up, users first, then groups
//! 3. [`substitute`] rewrites the message with the resolved references
//!
//! [`resolve_mentions`] runs all three and refuses to return a partially
//! rewritten message.
//!
//! # Examples
//!
//! ```
//! use step_notify::core::services::extract_mentions;
//!
//! let names: Vec<_> = extract_mentions("hello <@jh>, <@some user group>!")
//!     .map(|t| t.as_str())
//!     .collect();
//! assert_eq!(names, ["jh", "some user group"]);
//! ```

use std::collections::BTreeSet;
use std::iter::FusedIterator;
use std::ops::Range;

use thiserror::Error;

use crate::core::models::{IdentityMapping, MentionToken, Reference};
use crate::core::ports::{IdentityLookup, PlatformError};

/// Errors that can occur while resolving mentions
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Listing users or groups failed
    #[error("failed to look up slack users and groups")]
    Lookup(#[from] PlatformError),

    /// Some mentions match neither a user nor a group
    #[error(
        "could not find all slack users and groups: missing [{names}], found {found}",
        names = .missing.join(", ")
    )]
    Unresolved {
        /// Mentions that did resolve
        found: IdentityMapping,
        /// Lowercased names that did not resolve
        missing: Vec<String>,
    },
}

const OPEN: &str = "<@";
const CLOSE: u8 = b'>';

const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b' ')
}

/// Find the next mention at or after `from`
///
/// Returns the byte range of the name, without the brackets.
fn find_next(message: &str, mut from: usize) -> Option<Range<usize>> {
    let bytes = message.as_bytes();
    while let Some(offset) = message[from..].find(OPEN) {
        let start = from + offset + OPEN.len();
        let len = bytes[start..].iter().take_while(|b| is_name_byte(**b)).count();
        let end = start + len;
        if len > 0 && bytes.get(end) == Some(&CLOSE) {
            return Some(start..end);
        }
        // Names never contain '<', so no mention can start inside the run.
        from = end;
    }
    None
}

/// Lazy, restartable sequence of mentions in a message
///
/// Created by [`extract_mentions`]. Clone it to scan again from the same
/// point.
#[derive(Debug, Clone)]
pub struct Mentions<'a> {
    message: &'a str,
    pos: usize,
}

impl<'a> Iterator for Mentions<'a> {
    type Item = MentionToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = find_next(self.message, self.pos) {
            self.pos = name.end + 1;
            Some(MentionToken::new(&self.message[name]))
        } else {
            self.pos = self.message.len();
            None
        }
    }
}

impl FusedIterator for Mentions<'_> {}

/// Extract `<@name>` mentions from a message, in order
///
/// A name is one or more ASCII letters, digits, underscores, hyphens or
/// spaces. Repeated mentions are yielded each time they occur.
#[must_use]
pub const fn extract_mentions(message: &str) -> Mentions<'_> {
    Mentions { message, pos: 0 }
}

/// Distinct lowercased mention names, in order of first appearance
fn distinct_keys(message: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    extract_mentions(message)
        .map(|token| token.key())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Resolve every distinct mention in `message` to a user or group
///
/// Users are listed first. Groups are only listed if some mention did not
/// match a user, and only unmatched mentions are compared against them, so
/// a user always wins over a group with the same name. Within one listing
/// the first match wins.
///
/// A group also matches when the mention spells its spaces as hyphens, so
/// `<@web-team>` finds a group named "Web Team".
///
/// # Errors
///
/// Returns [`ResolveError::Lookup`] if a listing fails and
/// [`ResolveError::Unresolved`] if any mention matched nothing.
pub fn find_mappings<L>(message: &str, lookup: &L) -> Result<IdentityMapping, ResolveError>
where
    L: IdentityLookup + ?Sized,
{
    let keys = distinct_keys(message);
    let mut mapping = IdentityMapping::new();
    if keys.is_empty() {
        return Ok(mapping);
    }

    let individuals = lookup.list_individuals()?;
    log::debug!("matching {} mention(s) against {} users", keys.len(), individuals.len());
    for key in &keys {
        if let Some(user) = individuals.iter().find(|u| u.display_name.to_lowercase() == *key) {
            mapping.insert(key.clone(), Reference::Individual(user.id.clone()));
        }
    }

    if mapping.len() == keys.len() {
        return Ok(mapping);
    }

    let groups = lookup.list_groups()?;
    let pending: Vec<&String> = keys.iter().filter(|k| !mapping.contains(k)).collect();
    log::debug!("matching {} mention(s) against {} groups", pending.len(), groups.len());
    for key in pending {
        let spaced = key.replace('-', " ");
        let found = groups.iter().find(|g| {
            let name = g.name.to_lowercase();
            name == *key || name == spaced
        });
        if let Some(group) = found {
            mapping.insert(key.clone(), Reference::Group(group.id.clone()));
        }
    }

    let missing: Vec<String> = keys.into_iter().filter(|k| !mapping.contains(k)).collect();
    if missing.is_empty() {
        Ok(mapping)
    } else {
        Err(ResolveError::Unresolved {
            found: mapping,
            missing,
        })
    }
}

/// Replace every resolved `<@name>` in `message` with its reference
///
/// The rewrite is a single pass, so a reference that happens to look like
/// a mention is never rewritten again. Mentions with no mapping are kept
/// as written.
#[must_use]
pub fn substitute(message: &str, mapping: &IdentityMapping) -> String {
    let mut out = String::with_capacity(message.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(name) = find_next(message, pos) {
        pos = name.end + 1;
        let token = MentionToken::new(&message[name.clone()]);
        if let Some(reference) = mapping.get(&token) {
            out.push_str(&message[copied..name.start - OPEN.len()]);
            out.push_str(&reference.to_string());
            copied = pos;
        }
    }

    out.push_str(&message[copied..]);
    out
}

/// Resolve and substitute all mentions in `message`
///
/// Either every mention is replaced or an error is returned; a partially
/// rewritten message is never produced.
///
/// # Errors
///
/// See [`find_mappings`].
pub fn resolve_mentions<L>(message: &str, lookup: &L) -> Result<String, ResolveError>
where
    L: IdentityLookup + ?Sized,
{
    let mapping = find_mappings(message, lookup)?;
    if !mapping.is_empty() {
        log::info!("resolved mentions: {mapping}");
    }
    Ok(substitute(message, &mapping))
}
