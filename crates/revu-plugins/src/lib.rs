//! Revu Plugins - dynamic plugin injection for the Revu code review UI.
//!
//! This crate provides:
//! - [`PluginLoader`]: process-wide, append-only injection registry with
//!   an `Uninitialized -> Loading -> Ready` lifecycle
//! - [`PluginInjector`] / [`ScriptEvaluator`]: the asynchronous injection
//!   seam, the only suspension point in the subsystem
//! - [`PluginHost`]: reactive bridge from the server config stream to the
//!   loader
//!
//! Injection is irreversible: there is no unload or cancellation path
//! anywhere in this crate, matching the platform constraint that injected
//! code cannot be retracted.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod descriptor;
mod error;
mod host;
mod injector;
mod loader;

pub use descriptor::{PluginDescriptor, PluginKind, PluginSource};
pub use error::{PluginError, PluginResult};
pub use host::{ConfigSubscription, PluginHost, plugin_load_list};
pub use injector::{HttpInjector, PluginInjector, ScriptEvaluator};
pub use loader::{LoaderState, PluginLoader};
