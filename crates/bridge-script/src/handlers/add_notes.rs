//! `add_notes` (§4.5): stage a note-add request for the piano-roll
//! interpreter. This handler never touches the note editor itself — it
//! can't, from this interpreter — so it writes the request file and tells
//! the client which manual trigger applies it.

use note_ipc::{RequestFile, Staging};
use serde::Deserialize;
use serde_json::{json, Value};
use sysex_proto::NoteData;

use crate::error::BridgeScriptError;
use crate::host_api::HostApi;

#[derive(Deserialize)]
struct Params {
    notes: Vec<NoteData>,
    #[serde(default)]
    pattern: Option<i64>,
    #[serde(default)]
    channel: Option<i64>,
}

pub fn handle(_host: &mut dyn HostApi, staging: &Staging, params: Value) -> Result<Value, BridgeScriptError> {
    let params: Params = serde_json::from_value(params)
        .map_err(|e| BridgeScriptError::HandlerFailed(e.to_string()))?;
    staging.write_request(&RequestFile::AddNotes {
        notes: params.notes,
        pattern: params.pattern,
        channel: params.channel,
    })?;
    Ok(json!({
        "success": true,
        "trigger": "run the piano-roll script to apply the staged notes",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHostApi;

    #[test]
    fn stages_a_request_file_for_the_piano_roll_script() {
        let mut host = StubHostApi::default();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        let params = json!({
            "notes": [{"midi": 60, "time": 0.0, "duration": 1.0, "velocity": 0.8}],
            "pattern": 1,
        });
        let result = handle(&mut host, &staging, params).unwrap();
        assert_eq!(result["success"], true);
        let staged = staging.read_request().unwrap().unwrap();
        assert_eq!(
            staged,
            RequestFile::AddNotes {
                notes: vec![NoteData::new(60, 0.0, 1.0, 0.8)],
                pattern: Some(1),
                channel: None,
            }
        );
    }
}
