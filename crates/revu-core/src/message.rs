//! Change message utilities.
//!
//! The only consumer in this subsystem is revert tracking: given a
//! change's message log, find the ids of the changes that were created as
//! reverts of it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ChangeId;

/// Tag the server attaches to auto-generated revert notices.
pub const TAG_REVERT: &str = "autogenerated:gerrit:revert";

/// Matches the body of an auto-generated revert notice.
static REVERT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Created a revert of this change as (.+)$").expect("revert regex is valid")
});

/// One entry in a change's message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeMessageInfo {
    /// Server-assigned message id.
    pub id: String,
    /// Message body.
    pub message: String,
    /// Optional server tag classifying the message.
    #[serde(default)]
    pub tag: Option<String>,
}

/// Extract the ids of changes created as reverts of this change.
///
/// Scans messages tagged as auto-generated revert notices and pulls the
/// id out of the `"Created a revert of this change as <id>"` body. A
/// parse failure for any individual tagged message empties the whole
/// result; failures are swallowed at this boundary, never surfaced.
#[must_use]
pub fn revert_created_change_ids(messages: &[ChangeMessageInfo]) -> Vec<ChangeId> {
    let ids: Option<Vec<ChangeId>> = messages
        .iter()
        .filter(|m| m.tag.as_deref() == Some(TAG_REVERT))
        .map(revert_change_id)
        .collect();
    ids.unwrap_or_else(|| {
        debug!("revert notice with unparseable body, dropping all revert ids");
        Vec::new()
    })
}

/// Extract the revert change id from a single tagged message body.
fn revert_change_id(msg: &ChangeMessageInfo) -> Option<ChangeId> {
    REVERT_REGEX
        .captures(&msg.message)
        .and_then(|caps| caps.get(1))
        .map(|m| ChangeId::new(m.as_str()))
}
