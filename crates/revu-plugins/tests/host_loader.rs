//! End-to-end plugin pipeline tests.
//!
//! Drives the public API the way the application does: a server config
//! snapshot arrives on a watch channel, the [`PluginHost`] derives the
//! load list, and the [`PluginLoader`] injects each URL through a
//! [`PluginInjector`]. The injector here records calls instead of
//! fetching anything over the network.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use revu_core::{GerritInfo, PluginConfigInfo, ServerInfo};
use revu_plugins::{
    LoaderState, PluginError, PluginHost, PluginInjector, PluginKind, PluginLoader, PluginResult,
    PluginSource,
};
use tokio::sync::watch;

/// Records every injection; fails URLs containing "broken".
struct RecordingInjector {
    calls: Mutex<Vec<(String, PluginKind, Option<String>)>>,
}

impl RecordingInjector {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn urls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _, _)| url.clone())
            .collect()
    }
}

#[async_trait]
impl PluginInjector for RecordingInjector {
    async fn inject(&self, source: &PluginSource, instance_id: Option<&str>) -> PluginResult<()> {
        self.calls.lock().unwrap().push((
            source.url.clone(),
            source.kind,
            instance_id.map(str::to_string),
        ));
        if source.url.contains("broken") {
            return Err(PluginError::Evaluate {
                url: source.url.clone(),
                message: "syntax error".to_string(),
            });
        }
        Ok(())
    }
}

fn server_info(theme: Option<&str>, scripts: &[&str], instance_id: Option<&str>) -> ServerInfo {
    ServerInfo {
        plugin: PluginConfigInfo {
            js_resource_paths: scripts.iter().map(|s| (*s).to_string()).collect(),
        },
        default_theme: theme.map(str::to_string),
        gerrit: GerritInfo {
            instance_id: instance_id.map(str::to_string),
        },
    }
}

fn pipeline() -> (Arc<RecordingInjector>, Arc<PluginLoader>, PluginHost) {
    let injector = Arc::new(RecordingInjector::new());
    let loader = Arc::new(PluginLoader::new(
        Arc::clone(&injector) as Arc<dyn PluginInjector>
    ));
    let host = PluginHost::new(Arc::clone(&loader));
    (injector, loader, host)
}

#[tokio::test]
async fn config_snapshot_drives_injection_theme_first() {
    let (injector, loader, host) = pipeline();
    let (_tx, rx) = watch::channel(Some(server_info(
        Some("static/theme.js"),
        &["plugins/a.js", "plugins/b.js"],
        Some("host-1"),
    )));

    let subscription = host.attach(rx);
    loader.await_plugins_loaded().await;

    assert_eq!(
        injector.urls(),
        vec!["static/theme.js", "plugins/a.js", "plugins/b.js"]
    );
    let calls = injector.calls.lock().unwrap();
    assert_eq!(calls[0].1, PluginKind::Theme);
    assert_eq!(calls[0].2.as_deref(), Some("host-1"));
    drop(calls);
    drop(subscription);
}

#[tokio::test]
async fn successive_snapshots_only_inject_new_urls() {
    let (injector, loader, host) = pipeline();
    let (tx, rx) = watch::channel(Some(server_info(None, &["plugins/a.js"], None)));

    let subscription = host.attach(rx);
    loader.await_plugins_loaded().await;

    tx.send_replace(Some(server_info(
        None,
        &["plugins/a.js", "plugins/c.js"],
        None,
    )));
    loader
        .subscribe_state()
        .wait_for(|s| *s == LoaderState::Loading)
        .await
        .unwrap();
    loader.await_plugins_loaded().await;

    assert_eq!(injector.urls(), vec!["plugins/a.js", "plugins/c.js"]);
    assert_eq!(loader.len(), 2);
    drop(subscription);
}

#[tokio::test]
async fn broken_plugin_does_not_block_readiness_or_siblings() {
    let (injector, loader, host) = pipeline();
    let (_tx, rx) = watch::channel(Some(server_info(
        None,
        &["plugins/a.js", "plugins/broken.js", "plugins/b.js"],
        None,
    )));

    let subscription = host.attach(rx);
    loader.await_plugins_loaded().await;

    assert_eq!(
        injector.urls(),
        vec!["plugins/a.js", "plugins/broken.js", "plugins/b.js"]
    );
    assert_eq!(loader.state(), LoaderState::Ready);
    assert!(loader.descriptor("plugins/a.js").unwrap().loaded);
    assert!(!loader.descriptor("plugins/broken.js").unwrap().loaded);
    assert!(loader.descriptor("plugins/b.js").unwrap().loaded);
    drop(subscription);
}

#[tokio::test]
async fn two_hosts_share_one_loader_without_double_injection() {
    let (injector, loader, host) = pipeline();
    let second_host = PluginHost::new(Arc::clone(&loader));

    let (_tx_a, rx_a) = watch::channel(Some(server_info(None, &["plugins/a.js"], None)));
    let (_tx_b, rx_b) = watch::channel(Some(server_info(None, &["plugins/a.js"], None)));

    let sub_a = host.attach(rx_a);
    let sub_b = second_host.attach(rx_b);
    loader.await_plugins_loaded().await;
    // Let the second subscription process its snapshot too.
    tokio::task::yield_now().await;
    loader.await_plugins_loaded().await;

    assert_eq!(injector.urls(), vec!["plugins/a.js"]);
    drop(sub_a);
    drop(sub_b);
}

#[tokio::test]
async fn detached_subscription_keeps_reacting() {
    let (injector, loader, host) = pipeline();
    let (tx, rx) = watch::channel(Some(server_info(None, &["plugins/a.js"], None)));

    host.attach(rx).detach();
    loader.await_plugins_loaded().await;

    tx.send_replace(Some(server_info(None, &["plugins/b.js"], None)));
    loader
        .subscribe_state()
        .wait_for(|s| *s == LoaderState::Loading)
        .await
        .unwrap();
    loader.await_plugins_loaded().await;

    assert_eq!(injector.urls(), vec!["plugins/a.js", "plugins/b.js"]);
}
