//! Domain models for step-notify
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`ConditionSet`] - "Notify only when these hold"
//! - [`MentionToken`] - A `<@name>` mention in a message
//! - [`Reference`] - What a mention resolved to
//! - [`Block`] - Layout of the posted message

mod condition;
mod mention;
mod message;

pub use condition::{ConditionError, ConditionSet, EvaluationInput, Rejection, Verdict};
pub use mention::{Group, IdentityMapping, Individual, MentionToken, Reference};
pub use message::{Block, BuildInfo, Channel, ChannelPage, PostedMessage, TextObject};
