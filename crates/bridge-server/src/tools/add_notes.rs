//! `add_notes` (§4.5): stage notes for the piano-roll interpreter via the
//! Inner Bridge. The response is a trigger hint, not confirmation that the
//! notes are applied — that requires the user-gesture hop (§9 open question).

use serde::Deserialize;
use serde_json::{json, Value};
use sysex_proto::NoteData;

use crate::error::BridgeServerError;
use crate::midi_ops::response_data;
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    notes: Vec<NoteData>,
    #[serde(default)]
    pattern: Option<i64>,
    #[serde(default)]
    channel: Option<i64>,
}

pub async fn call(state: &AppState, args: Value) -> Result<Value, BridgeServerError> {
    let params: Params =
        serde_json::from_value(args).map_err(|e| BridgeServerError::InvalidParams(e.to_string()))?;

    let response = state
        .correlator
        .execute(
            "add_notes",
            json!({"notes": params.notes, "pattern": params.pattern, "channel": params.channel}),
        )
        .await?;
    response_data(response)
}
