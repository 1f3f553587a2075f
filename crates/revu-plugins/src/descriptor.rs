//! Plugin source and registry descriptors.

/// What a plugin URL contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    /// App-wide styling; always sequenced before scripts, because plugin
    /// code may assume theme-provided globals exist at evaluation time.
    Theme,
    /// Feature plugin script.
    Script,
}

/// One plugin URL with its kind, in load order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginSource {
    /// URL the plugin is injected from.
    pub url: String,
    /// Theme or script.
    pub kind: PluginKind,
}

impl PluginSource {
    /// A theme source.
    #[must_use]
    pub fn theme(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: PluginKind::Theme,
        }
    }

    /// A script source.
    #[must_use]
    pub fn script(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: PluginKind::Script,
        }
    }
}

/// Registry entry for a URL that has been requested for injection.
///
/// Descriptors are created on first appearance and never deleted:
/// injected code cannot be retracted, so the registry is append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Injection URL (the registry key).
    pub url: String,
    /// Theme or script.
    pub kind: PluginKind,
    /// Whether the injection has completed successfully.
    pub loaded: bool,
}
