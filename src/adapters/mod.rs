//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `slack/` - Slack Web API client

pub mod slack;

pub use slack::SlackClient;
