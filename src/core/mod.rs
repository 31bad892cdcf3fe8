//! Core domain logic for step-notify
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`ConditionSet`, `MentionToken`, `Reference`, `Block`)
//! - `services/` - Condition evaluation, mention resolution, message layout
//! - `ports/` - Trait definitions for the chat platform

pub mod models;
pub mod ports;
pub mod services;
