//! Server configuration snapshot model.
//!
//! Mirrors the fields the plugin host consumes from the server info
//! endpoint: plugin resource paths, the default theme, and the instance
//! id. Snapshots are immutable values; every emission on the config
//! stream is a fresh snapshot, and consumers compare them by equality.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreResult};

/// Plugin-related server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfigInfo {
    /// Plugin script URLs, in server-given load order.
    #[serde(default)]
    pub js_resource_paths: Vec<String>,
}

/// Host metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GerritInfo {
    /// Opaque identifier of the server instance that produced the snapshot.
    #[serde(default)]
    pub instance_id: Option<String>,
}

/// One immutable server configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Plugin configuration.
    #[serde(default)]
    pub plugin: PluginConfigInfo,
    /// App-wide theme plugin URL, loaded before all script plugins.
    #[serde(default)]
    pub default_theme: Option<String>,
    /// Host metadata.
    #[serde(default)]
    pub gerrit: GerritInfo,
}

impl ServerInfo {
    /// Parse a snapshot from the JSON body returned by the server.
    ///
    /// Fields the server omits fall back to their defaults; the plugin
    /// host treats an absent section the same as an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the body is not valid JSON for
    /// this model.
    pub fn from_json(body: &str) -> CoreResult<Self> {
        serde_json::from_str(body).map_err(ConfigError::from)
    }
}
