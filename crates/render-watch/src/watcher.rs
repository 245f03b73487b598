//! Filesystem watcher (§4.9). Runs on its own OS thread — same shape as
//! `midi-link`'s port callback: blocking I/O stays off the Outer Server's
//! event loop, results flow out through a shared, lock-protected registry.

use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use tracing::{debug, warn};

use crate::error::RenderWatchError;
use crate::registry::RenderRegistry;

pub const RECOGNIZED_EXTENSIONS: &[&str] = &["wav", "flac", "ogg", "mp3"];

/// Minimum debounce before a newly-created file is registered — enough to
/// avoid reading a partially-written render (§5: "watcher debounce >= 200ms").
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

const SIZE_POLL_INTERVAL: Duration = Duration::from_millis(50);
const SIZE_STABLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Owns the live `notify` watcher; dropping this stops watching.
pub struct RenderWatcher {
    _watcher: RecommendedWatcher,
}

impl RenderWatcher {
    pub fn start(dir: impl Into<PathBuf>, registry: Arc<RenderRegistry>) -> Result<Self, RenderWatchError> {
        Self::start_with_debounce(dir, registry, DEFAULT_DEBOUNCE)
    }

    pub fn start_with_debounce(
        dir: impl Into<PathBuf>,
        registry: Arc<RenderRegistry>,
        debounce: Duration,
    ) -> Result<Self, RenderWatchError> {
        let dir = dir.into();
        let (tx, rx) = std_mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        std::thread::Builder::new()
            .name("render-watch".into())
            .spawn(move || {
                for res in rx {
                    match res {
                        Ok(event) => handle_event(event, &registry, debounce),
                        Err(e) => {
                            // Non-fatal: previously-registered entries remain usable (§4.9).
                            warn!("render watcher error: {}", e);
                        }
                    }
                }
            })
            .expect("failed to spawn render-watch thread");

        Ok(Self { _watcher: watcher })
    }
}

fn handle_event(event: Event, registry: &Arc<RenderRegistry>, debounce: Duration) {
    if !matches!(event.kind, EventKind::Create(_)) {
        return;
    }
    for path in event.paths {
        if !has_recognized_extension(&path) {
            continue;
        }
        if wait_for_size_stable(&path, debounce) {
            let entry = registry.register(path);
            debug!(filename = %entry.filename, "registered render");
        }
    }
}

fn has_recognized_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| RECOGNIZED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Poll the file's size until it has been unchanged for `debounce`, or give
/// up after a generous timeout (the render may never finish, or the file
/// may have been removed).
fn wait_for_size_stable(path: &Path, debounce: Duration) -> bool {
    let mut last_size: Option<u64> = None;
    let mut stable_since = Instant::now();
    let deadline = Instant::now() + SIZE_STABLE_TIMEOUT;

    loop {
        let size = match std::fs::metadata(path) {
            Ok(meta) => meta.len(),
            Err(_) => return false,
        };
        match last_size {
            Some(prev) if prev == size => {
                if stable_since.elapsed() >= debounce {
                    return true;
                }
            }
            _ => stable_since = Instant::now(),
        }
        last_size = Some(size);

        if Instant::now() > deadline {
            return false;
        }
        std::thread::sleep(SIZE_POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_expected_extensions() {
        assert!(has_recognized_extension(Path::new("Pattern_1.wav")));
        assert!(has_recognized_extension(Path::new("take.FLAC")));
        assert!(!has_recognized_extension(Path::new("notes.txt")));
    }

    #[test]
    fn size_stable_detects_a_file_that_stops_growing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Pattern_1.wav");
        std::fs::write(&path, b"final content").unwrap();
        assert!(wait_for_size_stable(&path, Duration::from_millis(60)));
    }

    #[test]
    fn size_stable_gives_up_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.wav");
        assert!(!wait_for_size_stable(&path, Duration::from_millis(60)));
    }
}
