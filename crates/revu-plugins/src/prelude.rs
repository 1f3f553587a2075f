//! Convenience re-exports for plugin host consumers.

pub use crate::descriptor::{PluginDescriptor, PluginKind, PluginSource};
pub use crate::error::{PluginError, PluginResult};
pub use crate::host::{ConfigSubscription, PluginHost, plugin_load_list};
pub use crate::injector::{HttpInjector, PluginInjector, ScriptEvaluator};
pub use crate::loader::{LoaderState, PluginLoader};
