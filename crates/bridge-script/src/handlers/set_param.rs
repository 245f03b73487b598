//! `set_param` (§4.6): write a value through to the host. Shadow-state
//! bookkeeping happens on the Outer Server side, not here — this handler
//! only performs the host call and reports success.

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
    value: f64,
}

pub fn handle(host: &mut dyn HostApi, _staging: &Staging, params: Value) -> Result<Value, BridgeScriptError> {
    let params: Params = serde_json::from_value(params)
        .map_err(|e| BridgeScriptError::HandlerFailed(e.to_string()))?;
    host.set_parameter(params.channel, params.slot, params.index, params.value)
        .map_err(BridgeScriptError::HandlerFailed)?;
    Ok(json!({ "success": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubHostApi;

    #[test]
    fn writes_through_to_the_host() {
        let mut host = StubHostApi::default();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        let result =
            handle(&mut host, &staging, json!({"channel": 0, "slot": 0, "index": 3, "value": 0.75})).unwrap();
        assert_eq!(result["success"], true);
        assert_eq!(host.last_set, Some((0, 0, 3, 0.75)));
    }

    #[test]
    fn host_failure_is_reported() {
        let mut host = StubHostApi::failing();
        let dir = tempfile::tempdir().unwrap();
        let staging = Staging::open(dir.path()).unwrap();
        let err = handle(&mut host, &staging, json!({"channel": 0, "slot": 0, "index": 0, "value": 0.1}))
            .unwrap_err();
        assert!(matches!(err, BridgeScriptError::HandlerFailed(_)));
    }
}
