//! Identity lookup port
//!
//! Defines how mentions find the users and groups they refer to.

use super::PlatformError;
use crate::core::models::{Group, Individual};

/// Directory of users and groups on the chat platform
///
/// Each call enumerates everything the platform knows about. Results are
/// not cached between calls.
#[cfg_attr(test, mockall::automock)]
pub trait IdentityLookup {
    /// List all individual users
    fn list_individuals(&self) -> Result<Vec<Individual>, PlatformError>;

    /// List all user groups
    fn list_groups(&self) -> Result<Vec<Group>, PlatformError>;
}
