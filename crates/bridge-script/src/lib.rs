//! Inner Bridge (§4.4): the host-side controller script. Strictly
//! single-threaded, no tokio — the host's embedded interpreter has no safe
//! thread support (§5), so every module in this crate is synchronous.

pub mod bridge;
pub mod debug_log;
pub mod error;
pub mod handlers;
pub mod host_api;
pub mod router;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::Bridge;
pub use error::BridgeScriptError;
pub use host_api::HostApi;
pub use router::Router;

use debug_log::DebugLogLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber. When `config.debug` is set, logs
/// are additionally batched into the rotated file at `config.debug_file`
/// (or a default alongside the staging directory) rather than stdout/stderr,
/// which the host reserves for its own console (§6).
pub fn init_logging(config: &bridge_config::BridgeConfig) {
    let debug_layer = config
        .debug
        .then(|| DebugLogLayer::new(config.debug_file.clone().unwrap_or_else(default_debug_log_path)));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(debug_layer)
        .try_init();
}

fn default_debug_log_path() -> std::path::PathBuf {
    std::env::temp_dir().join("bridge-script-debug.log")
}
