//! `humanize_notes` (§4.8): a pure local transform, no MIDI round-trip —
//! the engine only needs the note array the caller already has.

use humanize::{humanize, preset, HumanizeOverrides, Instrument};
use serde::Deserialize;
use serde_json::{json, Value};
use sysex_proto::NoteData;

use crate::error::BridgeServerError;
use crate::state::AppState;

#[derive(Deserialize)]
struct Params {
    notes: Vec<NoteData>,
    #[serde(default = "default_preset")]
    preset: String,
    #[serde(default)]
    seed: Option<String>,
    #[serde(default)]
    swing_amount: Option<f64>,
    #[serde(default)]
    swing_grid: Option<f64>,
    #[serde(default)]
    drift_theta: Option<f64>,
    #[serde(default)]
    drift_sigma: Option<f64>,
    #[serde(default)]
    drift_context_aware: Option<bool>,
    #[serde(default)]
    instrument: Option<String>,
    #[serde(default)]
    velocity_variation_amount: Option<f64>,
    #[serde(default)]
    velocity_downbeat_boost: Option<f64>,
    #[serde(default)]
    length_amount: Option<f64>,
}

fn default_preset() -> String {
    "tight".to_string()
}

fn parse_instrument(name: &str) -> Result<Instrument, BridgeServerError> {
    match name {
        "generic" => Ok(Instrument::Generic),
        "drums" => Ok(Instrument::Drums),
        "piano" => Ok(Instrument::Piano),
        other => Err(BridgeServerError::InvalidParams(format!("unknown instrument {other:?}"))),
    }
}

pub async fn call(_state: &AppState, args: Value) -> Result<Value, BridgeServerError> {
    let params: Params =
        serde_json::from_value(args).map_err(|e| BridgeServerError::InvalidParams(e.to_string()))?;

    let base = preset(&params.preset)
        .ok_or_else(|| BridgeServerError::InvalidParams(format!("unknown preset {:?}", params.preset)))?;

    let instrument = params.instrument.as_deref().map(parse_instrument).transpose()?;

    let overrides = HumanizeOverrides {
        swing_amount: params.swing_amount,
        swing_grid: params.swing_grid,
        drift_theta: params.drift_theta,
        drift_sigma: params.drift_sigma,
        drift_context_aware: params.drift_context_aware,
        instrument,
        velocity_variation_amount: params.velocity_variation_amount,
        velocity_downbeat_boost: params.velocity_downbeat_boost,
        length_amount: params.length_amount,
    };

    let result = humanize(&params.notes, &base.with_overrides(&overrides), params.seed);

    Ok(json!({"success": true, "notes": result.notes, "seed": result.seed}))
}
