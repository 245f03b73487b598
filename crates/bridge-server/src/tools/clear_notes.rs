//! `clear_notes` (§4.5): same staging contract as `add_notes`, for removal.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeServerError;
use crate::midi_ops::response_data;
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
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
        .execute("clear", json!({"pattern": params.pattern, "channel": params.channel}))
        .await?;
    response_data(response)
}
