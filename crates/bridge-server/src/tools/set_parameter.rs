//! `set_parameter` (§4.6): resolve a name to an index, write it through the
//! Inner Bridge, then record the write in shadow state as `source=user`.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeServerError;
use crate::midi_ops::{discover_live, set_live};
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    channel: u8,
    slot: u8,
    /// Plugin family for semantic-alias pre-lookup (§4.7); pass any string
    /// when no alias table is registered for the plugin in use.
    family: String,
    name: String,
    value: f64,
}

pub async fn call(state: &AppState, args: Value) -> Result<Value, BridgeServerError> {
    let params: Params =
        serde_json::from_value(args).map_err(|e| BridgeServerError::InvalidParams(e.to_string()))?;

    let entry = state
        .resolver
        .resolve_name(params.channel, params.slot, &params.family, &params.name, |c, s| {
            discover_live(&state.correlator, c, s)
        })
        .await?;

    set_live(&state.correlator, params.channel, params.slot, entry.index, params.value)
        .await
        .map_err(|e| BridgeServerError::MidiLink(midi_link::MidiLinkError::HandlerFailed(e)))?;

    state.resolver.record_write(params.channel, params.slot, entry.index, params.value);

    Ok(json!({
        "success": true,
        "index": entry.index,
        "raw_name": entry.raw_name,
        "value": params.value,
    }))
}
