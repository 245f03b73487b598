//! Shadow state (§3, §4.6): the authoritative record of values the Outer
//! Server has written, since host parameter read-back cannot be trusted.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use sysex_proto::ShadowSource;

#[derive(Debug, Clone, PartialEq)]
pub struct ShadowEntry {
    pub value: f64,
    pub written_at: DateTime<Utc>,
    pub source: ShadowSource,
}

#[derive(Default)]
pub struct ShadowState {
    entries: Mutex<HashMap<(u8, u8, u32), ShadowEntry>>,
}

impl ShadowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, channel: u8, slot: u8, index: u32) -> Option<ShadowEntry> {
        self.entries.lock().expect("shadow state poisoned").get(&(channel, slot, index)).cloned()
    }

    /// Record a value the Outer Server itself wrote. Always wins.
    pub fn record_user(&self, channel: u8, slot: u8, index: u32, value: f64) {
        self.entries.lock().expect("shadow state poisoned").insert(
            (channel, slot, index),
            ShadowEntry { value, written_at: Utc::now(), source: ShadowSource::User },
        );
    }

    /// Record a value observed during discovery. Never displaces a `user`
    /// entry (§3 monotonicity invariant) — re-discovering a plugin must not
    /// erase what the user already set.
    pub fn record_discovered(&self, channel: u8, slot: u8, index: u32, value: f64) {
        let mut entries = self.entries.lock().expect("shadow state poisoned");
        let key = (channel, slot, index);
        if matches!(entries.get(&key), Some(e) if e.source == ShadowSource::User) {
            return;
        }
        entries.insert(key, ShadowEntry { value, written_at: Utc::now(), source: ShadowSource::Discovered });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_entry_is_never_displaced_by_discovered() {
        let shadow = ShadowState::new();
        shadow.record_user(0, 0, 0, 0.75);
        shadow.record_discovered(0, 0, 0, 0.10);
        let entry = shadow.get(0, 0, 0).unwrap();
        assert_eq!(entry.value, 0.75);
        assert_eq!(entry.source, ShadowSource::User);
    }

    #[test]
    fn discovered_can_overwrite_discovered() {
        let shadow = ShadowState::new();
        shadow.record_discovered(0, 0, 0, 0.10);
        shadow.record_discovered(0, 0, 0, 0.20);
        assert_eq!(shadow.get(0, 0, 0).unwrap().value, 0.20);
    }

    #[test]
    fn missing_entry_returns_none() {
        let shadow = ShadowState::new();
        assert!(shadow.get(1, 2, 3).is_none());
    }
}
