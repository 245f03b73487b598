//! `get_param` (§4.6, §9): a direct host read. Callers are told this may be
//! stale — the resolver's shadow state is the authoritative source.

use note_ipc::Staging;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeScriptError;
use crate::host_api::HostApi;

#[derive(Deserialize)]
struct Params {
    channel: u8,
    slot: u8,
    index: u32,
}

pub fn handle(host: &mut dyn HostApi, _staging: &Staging, params: Value) -> Result<Value, BridgeScriptError> {
    let params: Params = serde_json::from_value(params)
        .map_err(|e| BridgeScriptError::HandlerFailed(e.to_string()))?;
    let value = host
        .get_parameter(params.channel, params.slot, params.index)
        .map_err(BridgeScriptError::HandlerFailed)?;
    Ok(json!({ "success": true, "value": value, "live": true }))
}
