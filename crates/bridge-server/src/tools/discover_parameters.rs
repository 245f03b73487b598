//! `discover_parameters` (§4.6): round-trips to the Inner Bridge and seeds
//! the resolver's cache so subsequent name-based `set_parameter`/
//! `get_parameter` calls don't need their own discovery round-trip.

use serde::Deserialize;
use serde_json::{json, Value};
use sysex_proto::ParameterEntry;

use crate::error::BridgeServerError;
use crate::midi_ops::response_data;
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    channel: u8,
    slot: u8,
}

pub async fn call(state: &AppState, args: Value) -> Result<Value, BridgeServerError> {
    let params: Params =
        serde_json::from_value(args).map_err(|e| BridgeServerError::InvalidParams(e.to_string()))?;

    let response = state
        .correlator
        .execute("discover", json!({"channel": params.channel, "slot": params.slot}))
        .await?;
    let data = response_data(response)?;
    let entries: Vec<ParameterEntry> = serde_json::from_value(data["parameters"].clone())
        .map_err(|e| BridgeServerError::InvalidParams(format!("malformed discover response: {e}")))?;

    state.resolver.discover(params.channel, params.slot, entries.clone());

    Ok(json!({"success": true, "parameters": entries}))
}
