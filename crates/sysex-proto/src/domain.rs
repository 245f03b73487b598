//! Shared domain types referenced across the bridge (§3).

use serde::{Deserialize, Serialize};

/// One note in a pattern, as exchanged between the Outer Server, the
/// humanization engine, and the piano-roll file IPC contract.
///
/// Time and duration are in quarter-note (beat) units; the host-side
/// conversion to its own tick grid happens at apply time using the host's
/// pulses-per-quarter, which this crate does not need to know about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NoteData {
    pub midi: u8,
    pub time: f64,
    pub duration: f64,
    pub velocity: f64,
    #[serde(default = "default_pan")]
    pub pan: f64,
    #[serde(default)]
    pub color: u32,
}

fn default_pan() -> f64 {
    0.5
}

impl NoteData {
    pub fn new(midi: u8, time: f64, duration: f64, velocity: f64) -> Self {
        Self {
            midi,
            time,
            duration,
            velocity,
            pan: default_pan(),
            color: 0,
        }
    }
}

/// One entry in a plugin's discovered parameter list (§4.6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterEntry {
    pub index: u32,
    pub raw_name: String,
    /// Current value as reported by discovery, `[0,1]`. Not trusted for
    /// later reads — see `param-resolver`'s shadow state.
    pub value: f64,
}

/// Where a shadow-state value came from. A `User` entry is never displaced
/// by a `Discovered` one (§3 shadow monotonicity invariant).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShadowSource {
    User,
    Discovered,
}

/// An entry in the render registry (§3, §4.9).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderRegistryEntry {
    pub filename: String,
    pub absolute_path: String,
    pub first_seen_at: chrono::DateTime<chrono::Utc>,
    pub session_id: uuid::Uuid,
}
