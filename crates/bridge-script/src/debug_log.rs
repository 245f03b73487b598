//! Batched, rotated debug logging (§6 `FL_DEBUG`/`FL_DEBUG_FILE`).
//!
//! The host process owns stdout/stderr for its own console, so a normal
//! fmt subscriber writing there would spam it; this is a `tracing_subscriber`
//! `Layer` that instead batches lines in memory and appends them to a file,
//! rotating it once it grows past a size threshold.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::Event;
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Flush to disk once this many lines have accumulated, so a crash between
/// flushes loses at most a small window of log lines.
const FLUSH_EVERY: usize = 20;

/// Rotate once the on-disk file would exceed this size; the previous file
/// is kept as a single `.1` backup.
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;

struct Inner {
    path: PathBuf,
    buffer: Vec<String>,
}

pub struct DebugLogLayer {
    inner: Mutex<Inner>,
}

impl DebugLogLayer {
    pub fn new(path: PathBuf) -> Self {
        Self { inner: Mutex::new(Inner { path, buffer: Vec::new() }) }
    }

    fn rotate_if_needed(path: &PathBuf) {
        let Ok(metadata) = fs::metadata(path) else { return };
        if metadata.len() < ROTATE_AT_BYTES {
            return;
        }
        let mut backup = path.clone();
        backup.set_extension(match path.extension() {
            Some(ext) => format!("{}.1", ext.to_string_lossy()),
            None => "1".to_string(),
        });
        let _ = fs::rename(path, backup);
    }

    fn flush(path: &PathBuf, lines: &[String]) {
        if lines.is_empty() {
            return;
        }
        Self::rotate_if_needed(path);
        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else { return };
        for line in lines {
            let _ = writeln!(file, "{line}");
        }
    }
}

struct LineVisitor {
    message: String,
    fields: Vec<String>,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

impl<S> Layer<S> for DebugLogLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor { message: String::new(), fields: Vec::new() };
        event.record(&mut visitor);

        let timestamp = chrono::Utc::now().to_rfc3339();
        let target = event.metadata().target();
        let level = event.metadata().level();
        let line = if visitor.fields.is_empty() {
            format!("{timestamp} {level} {target}: {}", visitor.message)
        } else {
            format!("{timestamp} {level} {target}: {} ({})", visitor.message, visitor.fields.join(", "))
        };

        let Ok(mut inner) = self.inner.lock() else { return };
        inner.buffer.push(line);
        if inner.buffer.len() >= FLUSH_EVERY || *level <= tracing::Level::WARN {
            let path = inner.path.clone();
            let lines = std::mem::take(&mut inner.buffer);
            Self::flush(&path, &lines);
        }
    }
}

impl Drop for DebugLogLayer {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            let path = inner.path.clone();
            let lines = std::mem::take(&mut inner.buffer);
            Self::flush(&path, &lines);
        }
    }
}
