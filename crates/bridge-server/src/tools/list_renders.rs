//! `list_renders` (§4.9): the current session's render registry, as
//! detected by the filesystem watcher. Takes no arguments.

use serde_json::{json, Value};

use crate::error::BridgeServerError;
use crate::state::AppState;

pub async fn call(state: &AppState, _args: Value) -> Result<Value, BridgeServerError> {
    Ok(json!({"success": true, "renders": state.registry.entries()}))
}
