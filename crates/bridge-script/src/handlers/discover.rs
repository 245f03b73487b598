//! `discover` (§4.6): return the plugin's current parameter list so the
//! Outer Server can build its fuzzy-match cache.

use note_ipc::Staging;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::BridgeScriptError;
use crate::host_api::HostApi;

#[derive(Deserialize)]
struct Params {
    channel: u8,
    slot: u8,
}

pub fn handle(host: &mut dyn HostApi, _staging: &Staging, params: Value) -> Result<Value, BridgeScriptError> {
    let params: Params = serde_json::from_value(params)
        .map_err(|e| BridgeScriptError::HandlerFailed(e.to_string()))?;
    let parameters = host
        .discover_parameters(params.channel, params.slot)
        .map_err(BridgeScriptError::HandlerFailed)?;
    Ok(json!({ "success": true, "parameters": parameters }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHostApi;

    #[test]
    fn returns_the_stub_parameter_list() {
        let mut host = StubHostApi::with_params(vec![("Filter 1 Freq".into(), 0.5)]);
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        let result = handle(&mut host, &staging, json!({"channel": 0, "slot": 1})).unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(result["parameters"][0]["raw_name"], "Filter 1 Freq");
    }

    #[test]
    fn malformed_params_fail_cleanly() {
        let mut host = StubHostApi::default();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        let err = handle(&mut host, &staging, json!({"channel": "not a number"})).unwrap_err();
        assert!(matches!(err, BridgeScriptError::HandlerFailed(_)));
    }
}
