//! `sample_pitch` (§4.10): pitch-shift a registered render or a path under
//! the render/sample directories.

use sample_pipeline::sample_pitch;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeServerError;
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    input: String,
    semitones: f64,
}

pub async fn call(state: &AppState, args: Value) -> Result<Value, BridgeServerError> {
    let params: Params =
        serde_json::from_value(args).map_err(|e| BridgeServerError::InvalidParams(e.to_string()))?;

    let output = sample_pitch(&state.pipeline, &params.input, params.semitones).await?;

    Ok(json!({"success": true, "output_path": output.to_string_lossy()}))
}
