//! Outer Server (§4.1-§4.2, §6): the MCP-facing process that drives the
//! MIDI bridge link. Single-threaded cooperative concurrency (§5) — every
//! tool handler is an `async fn` suspending only at a correlated response,
//! a filesystem event, or a child process.

pub mod aliases;
pub mod error;
pub mod midi_ops;
pub mod server_handler;
pub mod state;
pub mod tool_schema;
pub mod tools;

pub use error::BridgeServerError;
pub use server_handler::BridgeServer;
pub use state::AppState;

/// Install the process-wide subscriber. The Outer Server runs as a normal
/// process (unlike the Inner Bridge, stdout isn't reserved for a host
/// console), so this is a plain `fmt` layer plus `EnvFilter`.
pub fn init_logging() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
