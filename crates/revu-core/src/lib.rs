//! Revu Core - Foundation types for the Revu code review UI.
//!
//! This crate provides:
//! - Diff line and side descriptors shared by the annotation API
//! - The server configuration snapshot model ([`ServerInfo`])
//! - Change message utilities (revert-id extraction)
//! - Error types for configuration parsing

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod config;
mod error;
mod message;
mod types;

pub use config::{GerritInfo, PluginConfigInfo, ServerInfo};
pub use error::{ConfigError, CoreResult};
pub use message::{ChangeMessageInfo, TAG_REVERT, revert_created_change_ids};
pub use types::{ChangeId, DiffLine, DiffLineType, ParseSideError, Side};
