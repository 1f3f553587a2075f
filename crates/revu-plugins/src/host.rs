//! Reactive bridge from the server config stream to the loader.
//!
//! The host subscribes to config snapshots and forwards the derived load
//! list to the [`PluginLoader`] on every emission. Dedup lives in the
//! loader, so re-emissions and overlapping lists are safe to forward
//! as-is. Snapshots are conflated: a subscriber that lags only ever sees
//! the latest value, never a backlog.

use std::sync::Arc;

use revu_core::ServerInfo;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::descriptor::PluginSource;
use crate::loader::PluginLoader;

/// Derive the ordered plugin load list from a config snapshot.
///
/// The default theme, when configured, comes first so that theme-provided
/// globals exist by the time script plugins evaluate. Script URLs follow
/// in server-given order.
#[must_use]
pub fn plugin_load_list(config: &ServerInfo) -> Vec<PluginSource> {
    let mut sources = Vec::new();
    if let Some(theme) = &config.default_theme {
        sources.push(PluginSource::theme(theme.clone()));
    }
    for url in &config.plugin.js_resource_paths {
        sources.push(PluginSource::script(url.clone()));
    }
    sources
}

/// Subscribes a [`PluginLoader`] to a server config stream.
#[derive(Debug, Clone)]
pub struct PluginHost {
    loader: Arc<PluginLoader>,
}

impl PluginHost {
    /// Create a host driving `loader`.
    #[must_use]
    pub fn new(loader: Arc<PluginLoader>) -> Self {
        Self { loader }
    }

    /// The loader this host drives.
    #[must_use]
    pub fn loader(&self) -> &Arc<PluginLoader> {
        &self.loader
    }

    /// React to every config emission on `config`, including the value
    /// already present when attaching.
    ///
    /// Each snapshot's load list is forwarded to the loader; the loader's
    /// registry makes the forwarding idempotent. `None` snapshots (config
    /// not fetched yet) are skipped. The subscription lives until the
    /// returned [`ConfigSubscription`] is dropped or the sender goes away.
    #[must_use]
    pub fn attach(&self, mut config: watch::Receiver<Option<ServerInfo>>) -> ConfigSubscription {
        let loader = Arc::clone(&self.loader);
        // Treat the current value as the first emission.
        config.mark_changed();
        let handle = tokio::spawn(async move {
            while config.changed().await.is_ok() {
                let snapshot = config.borrow_and_update().clone();
                let Some(snapshot) = snapshot else {
                    debug!("config not available yet, waiting");
                    continue;
                };
                let sources = plugin_load_list(&snapshot);
                info!(
                    plugin_count = sources.len(),
                    instance_id = ?snapshot.gerrit.instance_id,
                    "applying server config"
                );
                loader.load_plugins(sources, snapshot.gerrit.instance_id);
            }
        });
        ConfigSubscription {
            handle: Some(handle),
        }
    }
}

/// Handle for an active config subscription.
///
/// Dropping it stops the host from reacting to further emissions; plugins
/// already injected stay injected.
#[derive(Debug)]
pub struct ConfigSubscription {
    handle: Option<JoinHandle<()>>,
}

impl ConfigSubscription {
    /// Let the subscription run for the rest of the process lifetime.
    pub fn detach(mut self) {
        // Forget the handle so Drop does not abort the task.
        drop(self.handle.take());
    }
}

impl Drop for ConfigSubscription {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
