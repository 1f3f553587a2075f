//! Process-wide plugin loader.
//!
//! State machine per process lifetime: `Uninitialized -> Loading ->
//! Ready`, with `Loading` re-entered (not restarted) when new loads are
//! requested while earlier ones are still outstanding. The URL registry
//! is append-only, and there is no teardown path: injected code cannot
//! be unloaded, so the loader never pretends otherwise.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::descriptor::{PluginDescriptor, PluginSource};
use crate::injector::PluginInjector;

/// Lifecycle of the loader across the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderState {
    /// No load has been requested yet.
    Uninitialized,
    /// At least one injection is outstanding.
    Loading,
    /// Every injection requested so far has settled, success or failure.
    Ready,
}

/// Process-wide registry of injected plugins.
///
/// Each URL is injected at most once for the lifetime of the process,
/// checked against the registry rather than any single input list. Each
/// injection is an independent fire-and-forget unit: a failure is logged
/// and never blocks or aborts the others.
pub struct PluginLoader {
    injector: Arc<dyn PluginInjector>,
    registry: Arc<DashMap<String, PluginDescriptor>>,
    pending: Arc<AtomicUsize>,
    state_tx: watch::Sender<LoaderState>,
}

impl PluginLoader {
    /// Create a loader that injects through `injector`.
    #[must_use]
    pub fn new(injector: Arc<dyn PluginInjector>) -> Self {
        let (state_tx, _) = watch::channel(LoaderState::Uninitialized);
        Self {
            injector,
            registry: Arc::new(DashMap::new()),
            pending: Arc::new(AtomicUsize::new(0)),
            state_tx,
        }
    }

    /// Current loader state.
    #[must_use]
    pub fn state(&self) -> LoaderState {
        *self.state_tx.borrow()
    }

    /// Subscribe to loader state transitions.
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<LoaderState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the descriptor for `url`, if it was ever requested.
    #[must_use]
    pub fn descriptor(&self, url: &str) -> Option<PluginDescriptor> {
        self.registry.get(url).map(|entry| entry.clone())
    }

    /// Number of URLs ever requested for injection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether no URL has ever been requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Request injection of `sources`, in order, skipping URLs already
    /// registered by any earlier call.
    ///
    /// Requests are issued in caller order (the load list puts themes
    /// first), but each URL remains an independent fire-and-forget unit:
    /// nothing blocks on a theme completing, and a failed injection never
    /// aborts its siblings. `instance_id` is snapshotted for this batch;
    /// a different id on a later call does not invalidate or re-run
    /// earlier loads.
    pub fn load_plugins(&self, sources: Vec<PluginSource>, instance_id: Option<String>) {
        let mut batch = Vec::new();
        for source in sources {
            if self.registry.contains_key(&source.url) {
                debug!(url = %source.url, "plugin already requested, skipping");
                continue;
            }
            self.registry.insert(
                source.url.clone(),
                PluginDescriptor {
                    url: source.url.clone(),
                    kind: source.kind,
                    loaded: false,
                },
            );
            batch.push(source);
        }

        if batch.is_empty() {
            // Nothing new from this call; if nothing else is in flight,
            // the current batch has already finished. The pending check
            // runs under the channel lock so it cannot interleave with a
            // settling worker's publication.
            self.state_tx.send_if_modified(|state| {
                if self.pending.load(Ordering::SeqCst) == 0 {
                    *state = LoaderState::Ready;
                    true
                } else {
                    false
                }
            });
            return;
        }

        self.pending.fetch_add(batch.len(), Ordering::SeqCst);
        self.state_tx.send_replace(LoaderState::Loading);

        for source in batch {
            info!(url = %source.url, kind = ?source.kind, "loading plugin");
            let injector = Arc::clone(&self.injector);
            let registry = Arc::clone(&self.registry);
            let pending = Arc::clone(&self.pending);
            let state_tx = self.state_tx.clone();
            let instance = instance_id.clone();
            tokio::spawn(async move {
                match injector.inject(&source, instance.as_deref()).await {
                    Ok(()) => {
                        if let Some(mut entry) = registry.get_mut(&source.url) {
                            entry.loaded = true;
                        }
                        info!(url = %source.url, "plugin loaded");
                    },
                    Err(e) => {
                        // Isolated per URL; siblings keep going.
                        warn!(url = %source.url, error = %e, "plugin failed to load");
                    },
                }
                if pending.fetch_sub(1, Ordering::SeqCst) == 1 {
                    // A new batch can land between the decrement and this
                    // publication; re-check pending under the channel lock
                    // so a stale Ready never overwrites its Loading.
                    state_tx.send_if_modified(|state| {
                        if pending.load(Ordering::SeqCst) == 0 {
                            *state = LoaderState::Ready;
                            true
                        } else {
                            false
                        }
                    });
                }
            });
        }
    }

    /// Wait until every injection requested so far has settled.
    ///
    /// Resolves immediately when the loader is already
    /// [`LoaderState::Ready`]. This is a synchronization point for the
    /// current batch only; it says nothing about plugins future config
    /// emissions may request.
    pub async fn await_plugins_loaded(&self) {
        let mut rx = self.state_tx.subscribe();
        // The sender lives in self, so wait_for cannot observe a closed
        // channel while we hold &self.
        let _ = rx.wait_for(|state| *state == LoaderState::Ready).await;
    }
}

impl std::fmt::Debug for PluginLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLoader")
            .field("plugin_count", &self.registry.len())
            .field("pending", &self.pending.load(Ordering::SeqCst))
            .field("state", &self.state())
            .finish()
    }
}
