//! The render registry (§3, §4.9): session-scoped, cleared only at process
//! exit, single-writer (only the watcher thread registers entries).

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use sysex_proto::RenderRegistryEntry;

pub struct RenderRegistry {
    session_id: Uuid,
    entries: Mutex<Vec<RenderRegistryEntry>>,
}

impl Default for RenderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderRegistry {
    pub fn new() -> Self {
        Self { session_id: Uuid::new_v4(), entries: Mutex::new(Vec::new()) }
    }

    pub fn register(&self, path: PathBuf) -> RenderRegistryEntry {
        let absolute_path = path.canonicalize().unwrap_or_else(|_| path.clone());
        let filename = path.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_default();
        let entry = RenderRegistryEntry {
            filename,
            absolute_path: absolute_path.to_string_lossy().to_string(),
            first_seen_at: Utc::now(),
            session_id: self.session_id,
        };
        self.entries.lock().expect("render registry poisoned").push(entry.clone());
        entry
    }

    pub fn entries(&self) -> Vec<RenderRegistryEntry> {
        self.entries.lock().expect("render registry poisoned").clone()
    }

    pub fn find_by_filename(&self, name: &str) -> Option<RenderRegistryEntry> {
        self.entries
            .lock()
            .expect("render registry poisoned")
            .iter()
            .find(|e| e.filename == name)
            .cloned()
    }
}
