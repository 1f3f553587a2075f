//! Prelude module - commonly used types for convenient import.
//!
//! Use `use revu_core::prelude::*;` to import all essential types.

// Errors
pub use crate::{ConfigError, CoreResult};

// Diff descriptors
pub use crate::{ChangeId, DiffLine, DiffLineType, Side};

// Server config snapshot
pub use crate::{GerritInfo, PluginConfigInfo, ServerInfo};

// Change messages
pub use crate::{ChangeMessageInfo, TAG_REVERT, revert_created_change_ids};
