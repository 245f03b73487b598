//! `read_piano_roll_state` (§4.5 step 3): the state file the piano-roll
//! interpreter wrote after the user triggered it, relayed through the
//! Inner Bridge. Takes no arguments.

use serde_json::{json, Value};

use crate::error::BridgeServerError;
use crate::midi_ops::response_data;
use crate::state::AppState;

pub async fn call(state: &AppState, _args: Value) -> Result<Value, BridgeServerError> {
    let response = state.correlator.execute("read_state", json!({})).await?;
    response_data(response)
}
