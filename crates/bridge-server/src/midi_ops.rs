//! Helpers that bridge `midi-link`'s `Correlator` responses into the plain
//! `Result<_, String>` shapes `param-resolver`'s generic discover/read
//! closures require, and into `BridgeServerError` for direct tool use.

use midi_link::{Correlator, MidiLinkError};
use serde_json::{json, Value};
use sysex_proto::ParameterEntry;

use crate::error::BridgeServerError;

/// Turn a correlator response into its `data` payload, or an error built
/// from the transport/handler failure (§7's *HandlerFailed*).
pub fn response_data(response: sysex_proto::Response) -> Result<Value, BridgeServerError> {
    if response.is_ok() {
        Ok(response.data.unwrap_or(Value::Null))
    } else {
        let message = response.error_message.unwrap_or_else(|| "handler returned no message".to_string());
        Err(BridgeServerError::MidiLink(MidiLinkError::HandlerFailed(message)))
    }
}

/// `discover` closure for `Resolver::resolve_name`: round-trips through the
/// Inner Bridge and converts any failure to the resolver's `String` bound.
pub async fn discover_live(
    correlator: &Correlator,
    channel: u8,
    slot: u8,
) -> Result<Vec<ParameterEntry>, String> {
    let response = correlator
        .execute("discover", json!({"channel": channel, "slot": slot}))
        .await
        .map_err(|e| e.to_string())?;
    let data = response_data(response).map_err(|e| e.to_string())?;
    serde_json::from_value(data["parameters"].clone()).map_err(|e| e.to_string())
}

/// `get_live` closure for `Resolver::read_value`.
pub async fn get_live(
    correlator: &Correlator,
    channel: u8,
    slot: u8,
    index: u32,
) -> Result<f64, String> {
    let response = correlator
        .execute("get_param", json!({"channel": channel, "slot": slot, "index": index}))
        .await
        .map_err(|e| e.to_string())?;
    let data = response_data(response).map_err(|e| e.to_string())?;
    data["value"].as_f64().ok_or_else(|| "get_param response carried no numeric value".to_string())
}

/// Send a `set_param` command and report failure as a plain string, for use
/// inside the resolver's write path.
pub async fn set_live(
    correlator: &Correlator,
    channel: u8,
    slot: u8,
    index: u32,
    value: f64,
) -> Result<(), String> {
    let response = correlator
        .execute("set_param", json!({"channel": channel, "slot": slot, "index": index, "value": value}))
        .await
        .map_err(|e| e.to_string())?;
    response_data(response).map(|_| ()).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysex_proto::Response;

    #[test]
    fn ok_response_yields_its_data() {
        let response = Response::ok(1, json!({"value": 0.5}));
        let data = response_data(response).unwrap();
        assert_eq!(data["value"], 0.5);
    }

    #[test]
    fn error_response_becomes_handler_failed() {
        let response = Response::error(1, "plugin not found");
        let err = response_data(response).unwrap_err();
        assert!(matches!(err, BridgeServerError::MidiLink(MidiLinkError::HandlerFailed(_))));
        assert!(err.to_string().contains("plugin not found"));
    }
}
