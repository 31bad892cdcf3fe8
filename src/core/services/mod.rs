//! Business logic services
//!
//! Pure logic that operates on domain models. Services only reach the
//! chat platform through the port traits.
//!
//! - [`conditions`] - Decide whether a build step notifies
//! - [`mentions`] - Resolve `<@name>` mentions to platform references
//! - [`channels`] - Find a channel by name
//! - [`message`] - Lay out the posted message
//! - [`notify`] - Deliver a notification end to end

pub mod channels;
pub mod conditions;
pub mod mentions;
pub mod message;
pub mod notify;

pub use channels::{ChannelError, find_channel};
pub use conditions::evaluate;
pub use mentions::{
    Mentions, ResolveError, extract_mentions, find_mappings, resolve_mentions, substitute,
};
pub use message::{build_line, compose_blocks};
pub use notify::{Delivery, Notification, NotifyError, deliver};
