//! Render-watch (§4.9): detects newly-written audio files in the host's
//! output directory and registers them for downstream sample-pipeline
//! tools, so callers can refer to a render by filename instead of a path.

pub mod error;
pub mod registry;
pub mod watcher;

pub use error::RenderWatchError;
pub use registry::RenderRegistry;
pub use watcher::{RenderWatcher, DEFAULT_DEBOUNCE, RECOGNIZED_EXTENSIONS};
