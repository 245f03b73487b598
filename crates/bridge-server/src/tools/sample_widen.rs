//! `sample_widen` (§4.10): pitch-split both channels, optional micro-delay
//! on one, merge to stereo, normalise.

use sample_pipeline::widen;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeServerError;
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    input: String,
    semitones: f64,
    #[serde(default)]
    micro_delay_ms: Option<f64>,
}

pub async fn call(state: &AppState, args: Value) -> Result<Value, BridgeServerError> {
    let params: Params =
        serde_json::from_value(args).map_err(|e| BridgeServerError::InvalidParams(e.to_string()))?;

    let output = widen(&state.pipeline, &params.input, params.semitones, params.micro_delay_ms).await?;

    Ok(json!({"success": true, "output_path": output.to_string_lossy()}))
}
