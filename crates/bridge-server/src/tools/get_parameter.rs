//! `get_parameter` (§4.6, §9): resolve a name to an index, then prefer
//! shadow state over a live host read — host read-back is unreliable.

use serde::Deserialize;
use serde_json::{json, Value};

use param_resolver::ReadSource;

use crate::error::BridgeServerError;
use crate::midi_ops::{discover_live, get_live};
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    channel: u8,
    slot: u8,
    family: String,
    name: String,
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

    let (value, source) = state
        .resolver
        .read_value(params.channel, params.slot, entry.index, || {
            get_live(&state.correlator, params.channel, params.slot, entry.index)
        })
        .await?;

    let source = match source {
        ReadSource::Shadow => "shadow",
        ReadSource::LiveMaybeStale => "live_maybe_stale",
    };

    Ok(json!({
        "success": true,
        "index": entry.index,
        "raw_name": entry.raw_name,
        "value": value,
        "source": source,
    }))
}
