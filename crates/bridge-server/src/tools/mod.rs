//! The ten tool handlers exposed over MCP (§2 "Tool surface", §6 RPC
//! surface). Each is a thin wrapper that validates its arguments and calls
//! into the correlator, resolver, humanizer, or sample pipeline — the
//! non-trivial engineering lives in those crates, not here.

pub mod add_notes;
pub mod clear_notes;
pub mod discover_parameters;
pub mod get_parameter;
pub mod humanize_notes;
pub mod list_renders;
pub mod read_piano_roll_state;
pub mod sample_pitch;
pub mod sample_widen;
pub mod set_parameter;

use serde_json::Value;

use crate::error::BridgeServerError;
use crate::state::AppState;

/// Dispatch a tool call by name. Returns `InvalidParams` for argument
/// decode failures and an unknown-tool error for anything else — the
/// caller (the `ServerHandler` impl) maps both to an MCP error response.
pub async fn dispatch(state: &AppState, name: &str, args: Value) -> Result<Value, BridgeServerError> {
    match name {
        "discover_parameters" => discover_parameters::call(state, args).await,
        "set_parameter" => set_parameter::call(state, args).await,
        "get_parameter" => get_parameter::call(state, args).await,
        "add_notes" => add_notes::call(state, args).await,
        "clear_notes" => clear_notes::call(state, args).await,
        "read_piano_roll_state" => read_piano_roll_state::call(state, args).await,
        "humanize_notes" => humanize_notes::call(state, args).await,
        "list_renders" => list_renders::call(state, args).await,
        "sample_pitch" => sample_pitch::call(state, args).await,
        "sample_widen" => sample_widen::call(state, args).await,
        other => Err(BridgeServerError::InvalidParams(format!("unknown tool {other:?}"))),
    }
}
