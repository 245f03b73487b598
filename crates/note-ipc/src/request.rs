//! Request file schema (§6): what the MIDI-side handler stages for the
//! piano-roll interpreter to pick up.

use serde::{Deserialize, Serialize};

use sysex_proto::NoteData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RequestFile {
    AddNotes {
        notes: Vec<NoteData>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel: Option<i64>,
    },
    Clear {
        #[serde(skip_serializing_if = "Option::is_none")]
        pattern: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        channel: Option<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_notes_round_trips_through_json() {
        let req = RequestFile::AddNotes {
            notes: vec![NoteData::new(60, 0.0, 1.0, 0.8)],
            pattern: Some(1),
            channel: None,
        };
        let text = serde_json::to_string(&req).unwrap();
        assert!(text.contains("\"action\":\"add_notes\""));
        let back: RequestFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn clear_has_no_notes_field() {
        let req = RequestFile::Clear { pattern: Some(2), channel: Some(0) };
        let text = serde_json::to_string(&req).unwrap();
        assert!(!text.contains("notes"));
    }
}
