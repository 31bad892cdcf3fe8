//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundary between the core logic and the chat
//! platform. Implementations live in the `adapters` module.
//!
//! The core depends only on these traits, never on an HTTP client, so the
//! condition and mention logic can be tested without a network.

mod chat;
mod error;
mod identity_lookup;

pub use chat::ChatPlatform;
pub use error::{BoxError, PlatformError};
pub use identity_lookup::IdentityLookup;

#[cfg(test)]
pub use chat::MockChatPlatform;
#[cfg(test)]
pub use identity_lookup::MockIdentityLookup;
